/// Builds a YouTube results URL for an artist + title query.
pub fn search_url(artist: &str, title: &str) -> String {
    let query = format!("{artist} {title}");
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding(&query)
    )
}

/// Percent-encode a string for URL query parameters.
fn urlencoding(s: &str) -> String {
    use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
    const SET: &AsciiSet = &NON_ALPHANUMERIC
        .remove(b'-')
        .remove(b'_')
        .remove(b'.')
        .remove(b'~');
    utf8_percent_encode(s, SET).to_string()
}
