use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::types::Pagination;

pub const DISCOGS_BASE_URL: &str = "https://api.discogs.com";

const DISCOGS_UA: &str = "cratescope/1.0";

/// Personal-access token from the environment. Two names are accepted;
/// empty values are skipped.
pub fn token_from_env() -> Option<String> {
    ["DISCOGS_TOKEN", "DISCOGS_API_TOKEN"]
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|value| !value.is_empty()))
}

/// Discogs serializes ids and years as either JSON numbers or strings
/// depending on the endpoint mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    String(String),
}

impl NumberOrString {
    /// String form, treating zero and the empty string as absent.
    pub fn as_present_string(&self) -> Option<String> {
        match self {
            Self::Number(0) => None,
            Self::Number(n) => Some(n.to_string()),
            Self::String(s) if s.is_empty() => None,
            Self::String(s) => Some(s.clone()),
        }
    }

    /// String form with no absence rules.
    pub fn id_string(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }
}

/// One hit from `/database/search`. Collection and wantlist searches nest
/// most fields under `basic_information`; plain database searches keep them
/// flat. Every field is optional so either shape deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: Option<NumberOrString>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<NumberOrString>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub community: Option<Community>,
    #[serde(default)]
    pub basic_information: Option<BasicInformation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Community {
    #[serde(default)]
    pub want: Option<u32>,
    #[serde(default)]
    pub have: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicInformation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<NumberOrString>,
    #[serde(default)]
    pub formats: Option<Vec<NameRef>>,
    #[serde(default)]
    pub labels: Option<Vec<NameRef>>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<NameRef>>,
}

/// `{ "name": … }` wrapper used by the artists/labels/formats lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub results: Option<Vec<SearchHit>>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Release detail, fetched for its image list only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseDetail {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ReleaseImage>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseImage {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub resource_url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// The highest-resolution cover available: widest catalog image first,
/// then the thumbnail fallbacks.
pub fn best_image(detail: &ReleaseDetail) -> Option<String> {
    let mut images: Vec<&ReleaseImage> = detail.images.as_deref().unwrap_or_default().iter().collect();
    images.sort_by(|a, b| b.width.unwrap_or(0).cmp(&a.width.unwrap_or(0)));
    images
        .first()
        .and_then(|img| present(&img.uri).or_else(|| present(&img.resource_url)))
        .or_else(|| present(&detail.thumb))
        .or_else(|| present(&detail.cover_image))
}

fn present(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct DiscogsClient {
    http: reqwest::Client,
    base_url: String,
}

impl DiscogsClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DISCOGS_BASE_URL)
    }

    /// Base-url override for tests pointed at a local server.
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// One search against the release database, sorted by descending want
    /// count. Single attempt, no retries.
    pub async fn search_releases(
        &self,
        token: &str,
        genre: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPayload, LookupError> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        let resp = self
            .http
            .get(format!("{}/database/search", self.base_url))
            .query(&[
                ("genre", genre),
                ("type", "release"),
                ("sort", "want"),
                ("sort_order", "desc"),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .header("Authorization", format!("Discogs token={token}"))
            .header("User-Agent", DISCOGS_UA)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("Discogs search failed: {status} {body}");
            return Err(LookupError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<SearchPayload>()
            .await
            .map_err(|_| LookupError::InvalidFormat)
    }

    /// Full release record by id, for the image list.
    pub async fn release_detail(&self, token: &str, id: &str) -> Result<ReleaseDetail, LookupError> {
        let resp = self
            .http
            .get(format!("{}/releases/{id}", self.base_url))
            .header("Authorization", format!("Discogs token={token}"))
            .header("User-Agent", DISCOGS_UA)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("Discogs release fetch failed: {status} {body}");
            return Err(LookupError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<ReleaseDetail>()
            .await
            .map_err(|_| LookupError::InvalidFormat)
    }
}
