use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

use crate::utils;

/// Deserializes a list that may be `null` or contain `null` entries.
///
/// Spotify search results occasionally carry `null` items; they are dropped.
fn skip_nulls<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

// ---------------------------------------------------------------------------
// Upstream catalog records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "skip_nulls")]
    pub images: Vec<Image>,
    pub release_date: Option<String>,
}

/// A track as returned by search, lookup and top-track endpoints.
///
/// Simplified album tracks share this shape; they simply lack `album` and
/// `popularity`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "skip_nulls")]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub popularity: Option<u32>,
    pub duration_ms: Option<u64>,
    pub explicit: Option<bool>,
    pub available_markets: Option<Vec<String>>,
    pub disc_number: Option<u32>,
    pub track_number: Option<u32>,
}

impl Track {
    /// Artist names joined with `", "`, or `None` when no artist has a name.
    pub fn artist_names(&self) -> Option<String> {
        utils::join_artist_names(&self.artists)
    }

    pub fn album_name(&self) -> Option<String> {
        self.album.as_ref().and_then(|a| a.name.clone())
    }

    pub fn album_image(&self) -> Option<String> {
        self.album.as_ref().and_then(|a| utils::first_image(&a.images))
    }

    pub fn release_date(&self) -> Option<String> {
        self.album
            .as_ref()
            .and_then(|a| a.release_date.clone())
            .filter(|d| !d.is_empty())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date()
            .as_deref()
            .and_then(utils::parse_release_year)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "skip_nulls")]
    pub images: Vec<Image>,
    pub followers: Option<Followers>,
    pub popularity: Option<u32>,
    #[serde(default, deserialize_with = "skip_nulls")]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "skip_nulls")]
    pub artists: Vec<ArtistRef>,
    pub release_date: Option<String>,
    pub label: Option<String>,
    #[serde(default, deserialize_with = "skip_nulls")]
    pub images: Vec<Image>,
    pub tracks: Option<Paging<Track>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paging<T> {
    #[serde(default = "Vec::new", deserialize_with = "skip_nulls")]
    pub items: Vec<T>,
    pub total: Option<u64>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: Option<Paging<Track>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchAlbumsResponse {
    pub albums: Option<Paging<Album>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: Option<Paging<Artist>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default, deserialize_with = "skip_nulls")]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedArtistsResponse {
    #[serde(default, deserialize_with = "skip_nulls")]
    pub artists: Vec<Artist>,
}

/// Audio features of a track, each in `[0, 1]` when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub energy: Option<f64>,
    pub danceability: Option<f64>,
    pub valence: Option<f64>,
    pub acousticness: Option<f64>,
}

// ---------------------------------------------------------------------------
// Token broker
// ---------------------------------------------------------------------------

/// An application access token obtained with the client-credentials grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

// ---------------------------------------------------------------------------
// Aggregation views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongStats {
    pub track_id: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    pub album_image: Option<String>,
    pub popularity: Option<u32>,
    pub popularity_tier: String,
    pub duration_ms: Option<u64>,
    pub duration_formatted: Option<String>,
    pub release_date: Option<String>,
    pub release_year: Option<i32>,
    pub explicit: bool,
    pub markets_count: Option<usize>,
    pub mood_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumTrack {
    pub rank: usize,
    pub name: String,
    pub artist_name: String,
    pub popularity: Option<u32>,
    pub duration_ms: Option<u64>,
    pub duration_formatted: Option<String>,
    pub disc_number: Option<u32>,
    pub track_number: Option<u32>,
}

/// Album-level statistics derived from the resolved track list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumAggregate {
    pub total_tracks: usize,
    pub total_duration_ms: u64,
    pub total_duration_formatted: Option<String>,
    pub avg_popularity: Option<f64>,
    pub median_popularity: Option<f64>,
    pub top_track_name: Option<String>,
    pub top_track_popularity: Option<u32>,
    pub tracks: Vec<AlbumTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumAnalysis {
    pub album_id: String,
    pub album_name: Option<String>,
    pub artists: Option<String>,
    pub album_image: Option<String>,
    pub label: Option<String>,
    pub release_date: Option<String>,
    pub release_year: Option<i32>,
    #[serde(flatten)]
    pub aggregate: AlbumAggregate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTrack {
    pub track_id: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    pub album_image: Option<String>,
    pub popularity: Option<u32>,
    pub duration_ms: Option<u64>,
    pub duration_formatted: Option<String>,
    pub release_year: Option<i32>,
    pub explicit: bool,
}

impl From<&Track> for SeedTrack {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id.clone(),
            track_name: track.name.clone(),
            artist_name: track.artist_names(),
            album_name: track.album_name(),
            album_image: track.album_image(),
            popularity: track.popularity,
            duration_ms: track.duration_ms,
            duration_formatted: utils::format_duration_ms(track.duration_ms),
            release_year: track.release_year(),
            explicit: track.explicit.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub rank: usize,
    pub track_id: String,
    pub track_name: Option<String>,
    pub artist_name: String,
    pub album_name: String,
    pub album_image: Option<String>,
    pub popularity: Option<u32>,
    pub duration_formatted: Option<String>,
    pub release_year: Option<i32>,
    pub source_artist_name: Option<String>,
    pub score: f64,
    pub reason_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport {
    pub seed_track: SeedTrack,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendTrack {
    pub rank: usize,
    pub track_name: String,
    pub artist_name: String,
    pub popularity: Option<u32>,
    pub release_year: Option<i32>,
    pub duration_formatted: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub display_country: String,
    pub market: String,
    pub window: String,
    pub avg_popularity: Option<f64>,
    pub avg_release_year: Option<i32>,
    pub top_tracks: Vec<TrendTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistTopTrack {
    pub name: String,
    pub album_name: Option<String>,
    pub popularity: Option<u32>,
    pub duration_ms: Option<u64>,
    pub duration_formatted: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistStats {
    pub artist_id: String,
    pub name: String,
    pub image: Option<String>,
    pub followers: Option<u64>,
    pub popularity: Option<u32>,
    pub popularity_tier: String,
    pub genres: Vec<String>,
    pub album_count: Option<u64>,
    pub top_tracks: Vec<ArtistTopTrack>,
}

// ---------------------------------------------------------------------------
// Service directory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterServiceRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Tabled)]
pub struct ServiceTableRow {
    pub id: String,
    pub name: String,
    pub url: String,
    pub updated: String,
}
