use crate::{
    analysis::require_query,
    api::ApiError,
    catalog::CatalogSource,
    types::{AudioFeatures, SongStats},
    utils, warning,
};

/// Builds the song-stats view for the best track match of `query`.
///
/// The mood label is an enrichment: when the audio-features lookup fails the
/// label reports that no features were available.
pub async fn song_stats(
    catalog: &dyn CatalogSource,
    query: Option<&str>,
) -> Result<SongStats, ApiError> {
    let query = require_query(query, "song name or query")?;

    let track = catalog
        .search_tracks(query, 1, None)
        .await
        .map_err(|e| ApiError::from_catalog(e, "Failed to search track"))?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("No track found for that query"))?;

    let features = match track.id.as_deref() {
        Some(id) => catalog.audio_features(id).await.unwrap_or_else(|e| {
            warning!("Song Stats: audio features unavailable for {}: {}", id, e);
            AudioFeatures::default()
        }),
        None => AudioFeatures::default(),
    };

    Ok(SongStats {
        track_id: track.id.clone(),
        track_name: track.name.clone(),
        artist_name: track.artist_names(),
        album_name: track.album_name(),
        album_image: track.album_image(),
        popularity: track.popularity,
        popularity_tier: utils::popularity_tier(track.popularity).to_string(),
        duration_ms: track.duration_ms,
        duration_formatted: utils::format_duration_ms(track.duration_ms),
        release_date: track.release_date(),
        release_year: track.release_year(),
        explicit: track.explicit.unwrap_or(false),
        markets_count: track.available_markets.as_ref().map(Vec::len),
        mood_label: utils::mood_label(&features).to_string(),
    })
}
