use std::sync::Arc;

use axum::{Extension, Json, extract::Query};
use serde::Deserialize;

use crate::{
    analysis,
    api::ApiError,
    catalog::CatalogSource,
    types::{AlbumAnalysis, ArtistStats, SimilarityReport, SongStats, TrendReport},
};

/// Catalog shared by the aggregation handlers.
pub type SharedCatalog = Arc<dyn CatalogSource>;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendParams {
    pub country: Option<String>,
}

/// `GET /api/song-stats?q=`
pub async fn song_stats(
    Query(params): Query<SearchParams>,
    Extension(catalog): Extension<SharedCatalog>,
) -> Result<Json<SongStats>, ApiError> {
    analysis::song_stats(catalog.as_ref(), params.q.as_deref())
        .await
        .map(Json)
}

/// `GET /api/album-analyzer?q=`
pub async fn album_analyzer(
    Query(params): Query<SearchParams>,
    Extension(catalog): Extension<SharedCatalog>,
) -> Result<Json<AlbumAnalysis>, ApiError> {
    analysis::album_analysis(catalog.as_ref(), params.q.as_deref())
        .await
        .map(Json)
}

/// `GET /api/song-similarity?q=`
pub async fn song_similarity(
    Query(params): Query<SearchParams>,
    Extension(catalog): Extension<SharedCatalog>,
) -> Result<Json<SimilarityReport>, ApiError> {
    analysis::song_similarity(catalog.as_ref(), params.q.as_deref())
        .await
        .map(Json)
}

/// `GET /api/trend-analytics?country=`
pub async fn trend_analytics(
    Query(params): Query<TrendParams>,
    Extension(catalog): Extension<SharedCatalog>,
) -> Result<Json<TrendReport>, ApiError> {
    analysis::trend_analytics(catalog.as_ref(), params.country.as_deref())
        .await
        .map(Json)
}

/// `GET /api/artist-stats?q=`
pub async fn artist_stats(
    Query(params): Query<SearchParams>,
    Extension(catalog): Extension<SharedCatalog>,
) -> Result<Json<ArtistStats>, ApiError> {
    analysis::artist_stats(catalog.as_ref(), params.q.as_deref())
        .await
        .map(Json)
}
