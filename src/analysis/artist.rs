use crate::{
    analysis::{DEFAULT_MARKET, require_query},
    api::ApiError,
    catalog::CatalogSource,
    types::{ArtistStats, ArtistTopTrack},
    utils, warning,
};

const ALBUM_GROUPS: &str = "album,single";
const ALBUM_PAGE_LIMIT: u32 = 50;
const TOP_TRACK_SAMPLE: usize = 5;

/// Builds the artist-stats view for the best artist match of `query`.
///
/// The album count and the top-track sample are fetched concurrently and are
/// optional: a failed lookup leaves the count `None` or the sample empty.
pub async fn artist_stats(
    catalog: &dyn CatalogSource,
    query: Option<&str>,
) -> Result<ArtistStats, ApiError> {
    let query = require_query(query, "artist name or query")?;

    let hit = catalog
        .search_artists(query, 1)
        .await
        .map_err(|e| ApiError::from_catalog(e, "Failed to search artist"))?
        .into_iter()
        .find(|a| a.id.is_some())
        .ok_or_else(|| ApiError::not_found("No artist found for that query"))?;
    let artist_id = hit.id.clone().unwrap_or_default();

    let artist = catalog
        .artist(&artist_id)
        .await
        .map_err(|e| ApiError::from_catalog(e, "Failed to fetch artist details"))?;

    let (albums, top_tracks) = tokio::join!(
        catalog.artist_albums(&artist_id, ALBUM_GROUPS, ALBUM_PAGE_LIMIT),
        catalog.artist_top_tracks(&artist_id, DEFAULT_MARKET)
    );

    let album_count = match albums {
        Ok(page) => page.total.or(Some(page.items.len() as u64)),
        Err(e) => {
            warning!("Artist Stats: artist albums error: {}", e);
            None
        }
    };

    let top_tracks = match top_tracks {
        Ok(tracks) => tracks
            .into_iter()
            .take(TOP_TRACK_SAMPLE)
            .map(|t| ArtistTopTrack {
                name: t.name.clone().unwrap_or_else(|| "Unknown track".to_string()),
                album_name: t.album_name(),
                popularity: t.popularity,
                duration_ms: t.duration_ms,
                duration_formatted: utils::format_duration_ms(t.duration_ms),
            })
            .collect(),
        Err(e) => {
            warning!("Artist Stats: top-tracks error: {}", e);
            Vec::new()
        }
    };

    Ok(ArtistStats {
        artist_id,
        name: artist
            .name
            .clone()
            .or_else(|| hit.name.clone())
            .unwrap_or_else(|| "Unknown artist".to_string()),
        image: utils::first_image(&artist.images),
        followers: artist.followers.as_ref().and_then(|f| f.total),
        popularity: artist.popularity,
        popularity_tier: utils::popularity_tier(artist.popularity).to_string(),
        genres: artist.genres.clone(),
        album_count,
        top_tracks,
    })
}
