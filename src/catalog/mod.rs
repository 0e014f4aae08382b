//! # Catalog Module
//!
//! The aggregation pipelines never talk to Spotify directly. They consume a
//! [`CatalogSource`], a read-only view of the catalog offering the lookups
//! the pipelines need (search, track/album/artist lookup, top tracks, related
//! artists, an artist's albums and audio features).
//!
//! [`ProxyClient`] is the production source: it calls the proxy service over
//! HTTP. Tests substitute an in-memory source.
//!
//! Failures are reported as [`CatalogError`]. A non-2xx answer keeps the
//! status code and body so callers can pass the status through to their own
//! clients while keeping the body for diagnostics.

mod proxy;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Album, Artist, AudioFeatures, Paging, Track};

pub use proxy::ProxyClient;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("upstream responded with status {status}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid catalog id: {0:?}")]
    InvalidId(String),
}

/// Whether `id` can be used as a path segment of a catalog URL.
///
/// Spotify ids are base-62 strings, so anything outside `[A-Za-z0-9]` is
/// rejected before it reaches a URL.
pub fn is_catalog_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Searches tracks. `market` defaults to the proxy's market when `None`.
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<Track>, CatalogError>;

    /// Returns the best album match for the query.
    async fn search_albums(&self, query: &str) -> Result<Vec<Album>, CatalogError>;

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>, CatalogError>;

    async fn album(&self, id: &str) -> Result<Album, CatalogError>;

    async fn track(&self, id: &str) -> Result<Track, CatalogError>;

    async fn audio_features(&self, id: &str) -> Result<AudioFeatures, CatalogError>;

    async fn artist(&self, id: &str) -> Result<Artist, CatalogError>;

    async fn artist_top_tracks(&self, id: &str, market: &str) -> Result<Vec<Track>, CatalogError>;

    async fn related_artists(&self, id: &str) -> Result<Vec<Artist>, CatalogError>;

    async fn artist_albums(
        &self,
        id: &str,
        include_groups: &str,
        limit: u32,
    ) -> Result<Paging<Album>, CatalogError>;
}
