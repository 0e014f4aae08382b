use std::cmp::Reverse;

use futures::future::join_all;

use crate::{
    analysis::require_query,
    api::ApiError,
    catalog::CatalogSource,
    types::{AlbumAggregate, AlbumAnalysis, AlbumTrack, Track},
    utils, warning,
};

/// Merges a simplified album track with its full-detail record.
///
/// Fields of the full record win; the simplified stub fills in whatever the
/// full record lacks. The rank is assigned later by [`aggregate_album`].
pub fn merge_album_track(simplified: &Track, full: &Track) -> AlbumTrack {
    let duration_ms = full.duration_ms.or(simplified.duration_ms);

    AlbumTrack {
        rank: 0,
        name: full
            .name
            .clone()
            .or_else(|| simplified.name.clone())
            .unwrap_or_else(|| "Unknown track".to_string()),
        artist_name: full
            .artist_names()
            .or_else(|| simplified.artist_names())
            .unwrap_or_else(|| "Unknown".to_string()),
        popularity: full.popularity,
        duration_ms,
        duration_formatted: utils::format_duration_ms(duration_ms),
        disc_number: full.disc_number.or(simplified.disc_number),
        track_number: full.track_number.or(simplified.track_number),
    }
}

/// Aggregates resolved album tracks into album-level statistics.
///
/// Tracks without popularity are left out of the mean and median but still
/// count towards `total_tracks` and `total_duration_ms`. Tracks are ranked by
/// descending popularity, missing popularity last, keeping listing order
/// among ties.
pub fn aggregate_album(mut tracks: Vec<AlbumTrack>) -> AlbumAggregate {
    let total_duration_ms: u64 = tracks.iter().filter_map(|t| t.duration_ms).sum();
    let popularity: Vec<u32> = tracks.iter().filter_map(|t| t.popularity).collect();

    tracks.sort_by_key(|t| Reverse(t.popularity.map_or(-1, i64::from)));
    for (idx, track) in tracks.iter_mut().enumerate() {
        track.rank = idx + 1;
    }

    let top = tracks.first();

    AlbumAggregate {
        total_tracks: tracks.len(),
        total_duration_ms,
        total_duration_formatted: utils::format_duration_ms(Some(total_duration_ms)),
        avg_popularity: utils::mean(&popularity),
        median_popularity: utils::median(&popularity),
        top_track_name: top.map(|t| t.name.clone()),
        top_track_popularity: top.and_then(|t| t.popularity),
        tracks,
    }
}

/// Builds the album-analyzer view for the best album match of `query`.
///
/// Every listed track is looked up concurrently; a failed lookup drops that
/// track from the aggregate.
pub async fn album_analysis(
    catalog: &dyn CatalogSource,
    query: Option<&str>,
) -> Result<AlbumAnalysis, ApiError> {
    let query = require_query(query, "album name or query")?;

    let hit = catalog
        .search_albums(query)
        .await
        .map_err(|e| ApiError::from_catalog(e, "Failed to search album"))?
        .into_iter()
        .find(|a| a.id.is_some())
        .ok_or_else(|| ApiError::not_found("No album found for that query"))?;
    let album_id = hit.id.clone().unwrap_or_default();

    let album = catalog
        .album(&album_id)
        .await
        .map_err(|e| ApiError::from_catalog(e, "Failed to fetch album details"))?;

    let stubs: Vec<Track> = album
        .tracks
        .clone()
        .unwrap_or_default()
        .items
        .into_iter()
        .filter(|t| t.id.is_some())
        .collect();

    let lookups = stubs.into_iter().map(|stub| async move {
        let id = stub.id.clone().unwrap_or_default();
        match catalog.track(&id).await {
            Ok(full) => Some(merge_album_track(&stub, &full)),
            Err(e) => {
                warning!("Album Analyzer: track details error for {}: {}", id, e);
                None
            }
        }
    });
    let tracks: Vec<AlbumTrack> = join_all(lookups).await.into_iter().flatten().collect();

    let release_date = album
        .release_date
        .clone()
        .or_else(|| hit.release_date.clone())
        .filter(|d| !d.is_empty());

    Ok(AlbumAnalysis {
        album_id,
        album_name: album.name.clone().or_else(|| hit.name.clone()),
        artists: utils::join_artist_names(&album.artists)
            .or_else(|| utils::join_artist_names(&hit.artists)),
        album_image: utils::first_image(&album.images).or_else(|| utils::first_image(&hit.images)),
        label: album.label.clone().filter(|l| !l.is_empty()),
        release_year: release_date.as_deref().and_then(utils::parse_release_year),
        release_date,
        aggregate: aggregate_album(tracks),
    })
}
