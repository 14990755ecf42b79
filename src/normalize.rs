use crate::discogs::{NameRef, NumberOrString, SearchHit};
use crate::types::NormalizedRelease;

/// Placeholder artist for hits where no artist can be recovered.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Placeholder title for hits where no title can be recovered.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Flatten one raw search hit into a fully-populated record.
///
/// Collection-style results nest fields under `basic_information`; database
/// searches keep them flat. Both shapes resolve here so callers never see
/// the difference. Total: any hit maps to a record, missing data degrades
/// to defaults instead of erroring.
pub fn normalize_release(hit: &SearchHit, style: &str) -> NormalizedRelease {
    let basic = hit.basic_information.as_ref();

    let full_title = basic
        .and_then(|b| present(&b.title))
        .or_else(|| present(&hit.title))
        .unwrap_or_default();

    // Combined "Artist - Title" strings split on the first separator only;
    // later separators belong to the title.
    let (artist, title) = if let Some((head, rest)) = full_title.split_once(" - ") {
        (
            or_sentinel(head.trim(), UNKNOWN_ARTIST),
            or_sentinel(rest.trim(), UNKNOWN_TITLE),
        )
    } else if let Some(name) = basic
        .and_then(|b| b.artists.as_deref())
        .and_then(|artists| artists.first())
        .and_then(|artist| present(&artist.name))
    {
        (name, or_sentinel(&full_title, UNKNOWN_TITLE))
    } else {
        (
            UNKNOWN_ARTIST.to_string(),
            or_sentinel(&full_title, UNKNOWN_TITLE),
        )
    };

    let year = basic
        .and_then(|b| b.year.as_ref())
        .and_then(NumberOrString::as_present_string)
        .or_else(|| hit.year.as_ref().and_then(NumberOrString::as_present_string));

    let community = hit.community.as_ref();

    NormalizedRelease {
        discogs_id: hit
            .id
            .as_ref()
            .map(NumberOrString::id_string)
            .unwrap_or_default(),
        title,
        artist,
        year,
        label: basic.and_then(|b| first_name(&b.labels)),
        format: basic.and_then(|b| first_name(&b.formats)),
        genre: basic
            .and_then(|b| b.genres.as_deref())
            .and_then(|genres| genres.first())
            .cloned()
            .filter(|g| !g.is_empty()),
        style: style.to_string(),
        want_count: community.and_then(|c| c.want).unwrap_or(0),
        collect_count: community.and_then(|c| c.have).unwrap_or(0),
        thumbnail_url: basic
            .and_then(|b| present(&b.thumb))
            .or_else(|| present(&hit.thumb)),
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

fn or_sentinel(value: &str, sentinel: &str) -> String {
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value.to_string()
    }
}

fn first_name(refs: &Option<Vec<NameRef>>) -> Option<String> {
    refs.as_deref()
        .and_then(|refs| refs.first())
        .and_then(|r| present(&r.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(value: serde_json::Value) -> SearchHit {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn splits_on_first_separator_only() {
        let release = normalize_release(&hit(json!({ "title": "Artist - Song - Remix" })), "rock");
        assert_eq!(release.artist, "Artist");
        assert_eq!(release.title, "Song - Remix");
    }

    #[test]
    fn split_segments_are_trimmed() {
        let release = normalize_release(&hit(json!({ "title": "  Burial  -  Archangel  " })), "dubstep");
        assert_eq!(release.artist, "Burial");
        assert_eq!(release.title, "Archangel");
    }

    #[test]
    fn nested_artist_used_when_no_separator() {
        let release = normalize_release(
            &hit(json!({
                "basic_information": {
                    "title": "Kind Of Blue",
                    "artists": [{ "name": "Miles Davis" }, { "name": "John Coltrane" }]
                }
            })),
            "jazz",
        );
        assert_eq!(release.artist, "Miles Davis");
        assert_eq!(release.title, "Kind Of Blue");
    }

    #[test]
    fn sentinels_when_nothing_recoverable() {
        let release = normalize_release(&hit(json!({ "title": "Untitled" })), "rock");
        assert_eq!(release.artist, UNKNOWN_ARTIST);
        assert_eq!(release.title, "Untitled");

        let release = normalize_release(&hit(json!({})), "rock");
        assert_eq!(release.artist, UNKNOWN_ARTIST);
        assert_eq!(release.title, UNKNOWN_TITLE);
    }

    #[test]
    fn empty_split_segments_degrade_to_sentinels() {
        let release = normalize_release(&hit(json!({ "title": "Artist - " })), "rock");
        assert_eq!(release.artist, "Artist");
        assert_eq!(release.title, UNKNOWN_TITLE);

        let release = normalize_release(&hit(json!({ "title": " - Song" })), "rock");
        assert_eq!(release.artist, UNKNOWN_ARTIST);
        assert_eq!(release.title, "Song");
    }

    #[test]
    fn empty_object_yields_fully_defaulted_record() {
        let release = normalize_release(&hit(json!({})), "jazz");
        assert_eq!(release.discogs_id, "");
        assert_eq!(release.artist, UNKNOWN_ARTIST);
        assert_eq!(release.title, UNKNOWN_TITLE);
        assert_eq!(release.year, None);
        assert_eq!(release.label, None);
        assert_eq!(release.format, None);
        assert_eq!(release.genre, None);
        assert_eq!(release.style, "jazz");
        assert_eq!(release.want_count, 0);
        assert_eq!(release.collect_count, 0);
        assert_eq!(release.thumbnail_url, None);
    }

    #[test]
    fn nested_title_preferred_over_flat() {
        let release = normalize_release(
            &hit(json!({
                "title": "flat title",
                "basic_information": { "title": "Nested - Title" }
            })),
            "rock",
        );
        assert_eq!(release.artist, "Nested");
        assert_eq!(release.title, "Title");
    }

    #[test]
    fn empty_nested_title_falls_through_to_flat() {
        let release = normalize_release(
            &hit(json!({
                "title": "Artist - Flat",
                "basic_information": { "title": "" }
            })),
            "rock",
        );
        assert_eq!(release.artist, "Artist");
        assert_eq!(release.title, "Flat");
    }

    #[test]
    fn year_prefers_nested_and_skips_absent_values() {
        let release = normalize_release(
            &hit(json!({ "year": "2007", "basic_information": { "year": 1959 } })),
            "jazz",
        );
        assert_eq!(release.year.as_deref(), Some("1959"));

        // Zero and empty years fall through to the flat field.
        let release = normalize_release(
            &hit(json!({ "year": 2007, "basic_information": { "year": 0 } })),
            "jazz",
        );
        assert_eq!(release.year.as_deref(), Some("2007"));

        let release = normalize_release(&hit(json!({ "year": "" })), "jazz");
        assert_eq!(release.year, None);
    }

    #[test]
    fn label_format_genre_take_first_element_only() {
        let release = normalize_release(
            &hit(json!({
                "basic_information": {
                    "title": "x",
                    "labels": [{ "name": "Columbia" }, { "name": "Legacy" }],
                    "formats": [{ "name": "Vinyl" }, { "name": "CD" }],
                    "genres": ["Jazz", "Funk / Soul"]
                }
            })),
            "jazz",
        );
        assert_eq!(release.label.as_deref(), Some("Columbia"));
        assert_eq!(release.format.as_deref(), Some("Vinyl"));
        assert_eq!(release.genre.as_deref(), Some("Jazz"));
    }

    #[test]
    fn thumbnail_prefers_nested_then_flat() {
        let release = normalize_release(
            &hit(json!({
                "thumb": "flat.jpg",
                "basic_information": { "thumb": "nested.jpg" }
            })),
            "rock",
        );
        assert_eq!(release.thumbnail_url.as_deref(), Some("nested.jpg"));

        let release = normalize_release(
            &hit(json!({ "thumb": "flat.jpg", "basic_information": { "thumb": "" } })),
            "rock",
        );
        assert_eq!(release.thumbnail_url.as_deref(), Some("flat.jpg"));
    }

    #[test]
    fn id_is_stringified_from_either_shape() {
        let release = normalize_release(&hit(json!({ "id": 42 })), "rock");
        assert_eq!(release.discogs_id, "42");

        let release = normalize_release(&hit(json!({ "id": "r-42" })), "rock");
        assert_eq!(release.discogs_id, "r-42");
    }

    #[test]
    fn community_counters_default_to_zero() {
        let release = normalize_release(
            &hit(json!({ "community": { "want": 100 } })),
            "rock",
        );
        assert_eq!(release.want_count, 100);
        assert_eq!(release.collect_count, 0);
    }

    #[test]
    fn style_casing_is_preserved() {
        let release = normalize_release(&hit(json!({})), "Hip-Hop");
        assert_eq!(release.style, "Hip-Hop");
    }
}
