use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::discogs::{self, DiscogsClient, ReleaseImage};
use crate::error::LookupError;
use crate::lookup::ReleaseLookup;
use crate::styles;
use crate::types::{ReleasePage, StyleInfo};
use crate::youtube;

/// Shared per-process state handed to every handler. The style cache lives
/// inside the lookup service; nothing else is mutable.
pub struct AppState {
    pub lookup: ReleaseLookup<DiscogsClient>,
    pub discogs: DiscogsClient,
    pub token: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/styles", get(list_styles))
        .route("/api/releases/{style}", get(releases_for_style))
        .route("/api/release/{id}", get(release_image))
        .route("/api/youtube-search", post(youtube_search))
        .with_state(state)
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            LookupError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            LookupError::MissingToken => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
            LookupError::Upstream { status, body } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": format!("Discogs API error: {status}"), "details": body }),
            ),
            LookupError::InvalidFormat => {
                (StatusCode::BAD_GATEWAY, json!({ "error": self.to_string() }))
            }
            LookupError::Transport(err) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "failed to reach Discogs", "details": err.to_string() }),
            ),
            LookupError::Cache(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "style cache error", "details": err.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

async fn list_styles() -> Json<Vec<StyleInfo>> {
    Json(styles::catalog())
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
    per_page: Option<u32>,
}

async fn releases_for_style(
    State(state): State<Arc<AppState>>,
    Path(style): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ReleasePage>, LookupError> {
    let page = state
        .lookup
        .lookup(&style, query.page.unwrap_or(1), query.per_page.unwrap_or(20))
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseImageResponse {
    id: String,
    high_res_image: Option<String>,
    thumb: Option<String>,
    images: Vec<ReleaseImage>,
}

async fn release_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ReleaseImageResponse>, LookupError> {
    let token = state.token.as_deref().ok_or(LookupError::MissingToken)?;
    let detail = state.discogs.release_detail(token, &id).await?;
    let high_res_image = discogs::best_image(&detail);
    Ok(Json(ReleaseImageResponse {
        id,
        high_res_image,
        thumb: detail.thumb,
        images: detail.images.unwrap_or_default(),
    }))
}

#[derive(Deserialize)]
struct YoutubeSearchRequest {
    artist: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct YoutubeSearchResponse {
    url: String,
}

async fn youtube_search(
    Json(req): Json<YoutubeSearchRequest>,
) -> Result<Json<YoutubeSearchResponse>, LookupError> {
    let artist = req.artist.unwrap_or_default();
    let title = req.title.unwrap_or_default();
    if artist.is_empty() || title.is_empty() {
        return Err(LookupError::Validation(
            "Artist and title are required".to_string(),
        ));
    }
    Ok(Json(YoutubeSearchResponse {
        url: youtube::search_url(&artist, &title),
    }))
}
