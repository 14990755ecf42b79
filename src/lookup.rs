use std::future::Future;

use crate::discogs::{DiscogsClient, SearchPayload};
use crate::error::LookupError;
use crate::normalize::normalize_release;
use crate::store::StyleCache;
use crate::types::{Pagination, ReleasePage};

/// Upstream search collaborator. The real implementation talks to Discogs;
/// tests substitute a stub.
pub trait SearchUpstream {
    fn search(
        &self,
        token: &str,
        genre: &str,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<SearchPayload, LookupError>> + Send;
}

impl SearchUpstream for DiscogsClient {
    async fn search(
        &self,
        token: &str,
        genre: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPayload, LookupError> {
        self.search_releases(token, genre, page, per_page).await
    }
}

/// Cache-first release lookup.
///
/// A populated cache entry answers immediately with pagination synthesized
/// from the cached count — later pages are never refetched once a style is
/// cached, an accepted staleness tradeoff. A miss triggers exactly one
/// upstream search, normalizes every hit, and replaces the cache entry.
/// Concurrent misses for the same style may each fetch; the last writer's
/// rows win.
pub struct ReleaseLookup<S> {
    token: Option<String>,
    upstream: S,
    cache: StyleCache,
}

impl<S: SearchUpstream> ReleaseLookup<S> {
    pub fn new(token: Option<String>, upstream: S, cache: StyleCache) -> Self {
        Self {
            token,
            upstream,
            cache,
        }
    }

    pub async fn lookup(
        &self,
        style: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ReleasePage, LookupError> {
        if style.trim().is_empty() {
            return Err(LookupError::Validation("style is required".to_string()));
        }
        let per_page = per_page.max(1);

        let cached = self.cache.releases_for_style(style)?;
        if !cached.is_empty() {
            tracing::debug!("serving style \"{style}\" from cache ({} releases)", cached.len());
            let items = cached.len() as u32;
            return Ok(ReleasePage {
                results: cached,
                pagination: Pagination {
                    page,
                    pages: items.div_ceil(per_page),
                    per_page,
                    items,
                },
            });
        }

        let token = self.token.as_deref().ok_or(LookupError::MissingToken)?;

        tracing::info!("fetching style \"{style}\" from Discogs");
        let payload = self
            .upstream
            .search(token, &search_genre(style), page, per_page)
            .await?;
        let hits = payload.results.ok_or(LookupError::InvalidFormat)?;

        let results: Vec<_> = hits.iter().map(|hit| normalize_release(hit, style)).collect();

        // Empty answers are not cached; the next request asks upstream again.
        if !results.is_empty() {
            self.cache.replace_style(style, &results)?;
        }

        let pagination = payload.pagination.unwrap_or_else(|| Pagination {
            page,
            pages: 1,
            per_page,
            items: results.len() as u32,
        });
        Ok(ReleasePage { results, pagination })
    }
}

/// The upstream genre taxonomy capitalizes names; best-effort mapping from
/// a lowercase style slug, first letter only.
fn search_genre(style: &str) -> String {
    let mut chars = style.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
