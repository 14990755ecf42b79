#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// No Discogs credential configured in the environment.
    #[error("Discogs API token not configured")]
    MissingToken,
    /// Non-success status from Discogs, with the upstream body verbatim.
    #[error("Discogs API error: {status}")]
    Upstream { status: u16, body: String },
    /// Upstream JSON did not match the expected search payload shape.
    #[error("invalid response format from Discogs API")]
    InvalidFormat,
    /// Caller omitted a required parameter.
    #[error("{0}")]
    Validation(String),
    /// Transport-level failure reaching Discogs.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Style cache read/write failure.
    #[error("style cache error: {0}")]
    Cache(#[from] rusqlite::Error),
}
