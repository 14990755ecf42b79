use serde::{Deserialize, Serialize};

/// One release after normalization: flat, fully populated, renderable as-is.
///
/// Serialized in camelCase to match the JSON the browse UI consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRelease {
    /// Upstream catalog id. Opaque text; unique within one style's result
    /// set but not across styles.
    pub discogs_id: String,
    pub title: String,
    pub artist: String,
    /// Release year as supplied upstream. Kept as text, never parsed.
    pub year: Option<String>,
    pub label: Option<String>,
    pub format: Option<String>,
    pub genre: Option<String>,
    /// The style this record was fetched under, exactly as the caller sent it.
    pub style: String,
    pub want_count: u32,
    pub collect_count: u32,
    pub thumbnail_url: Option<String>,
}

/// Pagination block, passed through from upstream or synthesized locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub items: u32,
}

/// Response body for a style lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleasePage {
    pub results: Vec<NormalizedRelease>,
    pub pagination: Pagination,
}

/// Entry in the browsable style catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleInfo {
    pub name: String,
    pub display_name: String,
}
