use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use crate::{
    analysis::DEFAULT_MARKET,
    api::ApiError,
    catalog::{CatalogError, is_catalog_id},
    management::TokenManager,
    spotify, warning,
};

const MAX_LIMIT: u32 = 50;

/// State shared by the proxy handlers: the token cache and one HTTP client.
#[derive(Clone)]
pub struct ProxyState {
    pub tokens: Arc<Mutex<TokenManager>>,
    pub client: Client,
}

impl ProxyState {
    pub fn new(tokens: TokenManager) -> Self {
        Self {
            tokens: Arc::new(Mutex::new(tokens)),
            client: Client::new(),
        }
    }

    async fn access_token(&self) -> Result<String, ApiError> {
        let mut tokens = self.tokens.lock().await;
        tokens
            .get_valid_token()
            .await
            .map_err(|e| ApiError::Internal(format!("token broker: {}", e)))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProxyParams {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub market: Option<String>,
    pub include_groups: Option<String>,
}

impl ProxyParams {
    fn query(&self) -> Result<String, ApiError> {
        self.q
            .clone()
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ApiError::validation("Missing q query parameter"))
    }

    fn limit(&self, default: u32) -> u32 {
        parse_limit(self.limit.as_deref(), default)
    }

    fn market(&self) -> String {
        self.market
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MARKET.to_string())
    }
}

/// Parses a page size, falling back to `default` unless it is within `1..=50`.
pub fn parse_limit(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|l| l.trim().parse::<u32>().ok())
        .filter(|l| (1..=MAX_LIMIT).contains(l))
        .unwrap_or(default)
}

/// Rejects path ids that are not plain base-62 Spotify ids.
///
/// The id is decoded by the router, so `..%2F` or `%3F` would otherwise
/// rewrite the upstream path or query.
fn catalog_id(id: String) -> Result<String, ApiError> {
    if is_catalog_id(&id) {
        Ok(id)
    } else {
        Err(ApiError::validation("Invalid Spotify id"))
    }
}

/// Calls Spotify and relays the answer.
///
/// Success returns the upstream JSON verbatim. An upstream failure returns
/// `{error, status, raw}` with the upstream status code.
async fn forward(
    state: &ProxyState,
    path: &str,
    query: &[(&str, String)],
    label: &str,
) -> Result<Response, ApiError> {
    let token = state.access_token().await?;

    match spotify::web::get_json(&state.client, &token, path, query).await {
        Ok(body) => Ok(Json(body).into_response()),
        Err(CatalogError::Status { status, body }) => {
            warning!("Spotify {} error ({}): {}", label, status, body);
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((
                code,
                Json(json!({
                    "error": format!("Spotify {} request failed", label),
                    "status": status,
                    "raw": body,
                })),
            )
                .into_response())
        }
        Err(e) => Err(ApiError::Internal(format!("Proxy {} error: {}", label, e))),
    }
}

/// `GET /token/app`
pub async fn app_token(Extension(state): Extension<ProxyState>) -> Response {
    match state.access_token().await {
        Ok(token) => Json(json!({ "access_token": token })).into_response(),
        Err(e) => {
            warning!("Token broker error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to get app token" })),
            )
                .into_response()
        }
    }
}

/// `GET /spotify/search?q=&limit=&market=`
pub async fn search(
    Query(params): Query<ProxyParams>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let q = params.query()?;
    let query = [
        ("type", "track".to_string()),
        ("limit", params.limit(1).to_string()),
        ("market", params.market()),
        ("q", q),
    ];
    forward(&state, "search", &query, "search").await
}

/// `GET /spotify/search-playlists?q=&limit=`
pub async fn search_playlists(
    Query(params): Query<ProxyParams>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let q = params.query()?;
    let query = [
        ("type", "playlist".to_string()),
        ("limit", params.limit(10).to_string()),
        ("q", q),
    ];
    forward(&state, "search", &query, "playlist search").await
}

/// `GET /spotify/search-albums?q=`
pub async fn search_albums(
    Query(params): Query<ProxyParams>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let q = params.query()?;
    let query = [
        ("type", "album".to_string()),
        ("limit", "1".to_string()),
        ("q", q),
    ];
    forward(&state, "search", &query, "album search").await
}

/// `GET /spotify/search-artists?q=&limit=`
pub async fn search_artists(
    Query(params): Query<ProxyParams>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let q = params.query()?;
    let query = [
        ("type", "artist".to_string()),
        ("limit", params.limit(1).to_string()),
        ("q", q),
    ];
    forward(&state, "search", &query, "artist search").await
}

/// `GET /spotify/albums/{id}`
pub async fn album(
    Path(album_id): Path<String>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let album_id = catalog_id(album_id)?;
    let query = [("market", DEFAULT_MARKET.to_string())];
    forward(&state, &format!("albums/{}", album_id), &query, "albums").await
}

/// `GET /spotify/tracks/{id}`
pub async fn track(
    Path(track_id): Path<String>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let track_id = catalog_id(track_id)?;
    forward(&state, &format!("tracks/{}", track_id), &[], "tracks").await
}

/// `GET /spotify/audio-features/{id}`
pub async fn audio_features(
    Path(track_id): Path<String>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let track_id = catalog_id(track_id)?;
    forward(
        &state,
        &format!("audio-features/{}", track_id),
        &[],
        "audio-features",
    )
    .await
}

/// `GET /spotify/artists/{id}`
pub async fn artist(
    Path(artist_id): Path<String>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let artist_id = catalog_id(artist_id)?;
    forward(&state, &format!("artists/{}", artist_id), &[], "artists").await
}

/// `GET /spotify/artists/{id}/albums?include_groups=&limit=`
pub async fn artist_albums(
    Path(artist_id): Path<String>,
    Query(params): Query<ProxyParams>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let artist_id = catalog_id(artist_id)?;
    let include_groups = params
        .include_groups
        .clone()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| "album,single".to_string());
    let query = [
        ("include_groups", include_groups),
        ("limit", params.limit(MAX_LIMIT).to_string()),
    ];
    forward(
        &state,
        &format!("artists/{}/albums", artist_id),
        &query,
        "artist albums",
    )
    .await
}

/// `GET /spotify/artists/{id}/top-tracks?market=`
pub async fn artist_top_tracks(
    Path(artist_id): Path<String>,
    Query(params): Query<ProxyParams>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let artist_id = catalog_id(artist_id)?;
    let query = [("market", params.market())];
    forward(
        &state,
        &format!("artists/{}/top-tracks", artist_id),
        &query,
        "top-tracks",
    )
    .await
}

/// `GET /spotify/artists/{id}/related-artists`
pub async fn related_artists(
    Path(artist_id): Path<String>,
    Extension(state): Extension<ProxyState>,
) -> Result<Response, ApiError> {
    let artist_id = catalog_id(artist_id)?;
    forward(
        &state,
        &format!("artists/{}/related-artists", artist_id),
        &[],
        "related-artists",
    )
    .await
}
