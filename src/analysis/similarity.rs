//! Similar-track recommendations.
//!
//! Candidates come from the seed artist's top tracks and from the top tracks
//! of up to three related artists. Each candidate is compared with the seed
//! on four signals (release year, popularity, duration, explicit flag) and
//! scored; the best five are returned with a short reason string.

use std::collections::HashSet;

use futures::future::join_all;

use crate::{
    analysis::{DEFAULT_MARKET, require_query},
    api::ApiError,
    catalog::CatalogSource,
    types::{Artist, Recommendation, SeedTrack, SimilarityReport, Track},
    utils, warning,
};

/// Number of recommendations returned.
pub const RECOMMENDATION_LIMIT: usize = 5;
/// Number of related artists whose top tracks join the pool.
pub const RELATED_ARTIST_LIMIT: usize = 3;

const SAME_ARTIST_BONUS: f64 = 3.0;
const RELATED_ARTIST_BONUS: f64 = 2.0;
const POPULARITY_PENALTY_PER_POINT: f64 = 0.03;
const DURATION_PENALTY_CAP: f64 = 3.0;
const EXPLICIT_MISMATCH_PENALTY: f64 = 0.5;

/// Where a candidate was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    SameArtist,
    RelatedArtist,
}

/// The comparable attributes of a track; any of them may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackSignals {
    pub popularity: Option<u32>,
    pub duration_ms: Option<u64>,
    pub release_year: Option<i32>,
    pub explicit: Option<bool>,
}

impl From<&Track> for TrackSignals {
    fn from(track: &Track) -> Self {
        Self {
            popularity: track.popularity,
            duration_ms: track.duration_ms,
            release_year: track.release_year(),
            explicit: track.explicit,
        }
    }
}

/// Differences between a candidate and the seed. `None` means one side was unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimilarityDiffs {
    pub popularity_diff: Option<u32>,
    pub duration_diff_sec: Option<f64>,
    pub year_diff: Option<u32>,
    pub explicit_mismatch: bool,
}

impl SimilarityDiffs {
    pub fn between(seed: &TrackSignals, candidate: &TrackSignals) -> Self {
        Self {
            popularity_diff: seed
                .popularity
                .zip(candidate.popularity)
                .map(|(a, b)| a.abs_diff(b)),
            duration_diff_sec: seed
                .duration_ms
                .zip(candidate.duration_ms)
                .map(|(a, b)| a.abs_diff(b) as f64 / 1000.0),
            year_diff: seed
                .release_year
                .zip(candidate.release_year)
                .map(|(a, b)| a.abs_diff(b)),
            explicit_mismatch: matches!(
                (seed.explicit, candidate.explicit),
                (Some(a), Some(b)) if a != b
            ),
        }
    }
}

/// A track considered for recommendation.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub track: Track,
    pub source: CandidateSource,
    pub source_artist_name: Option<String>,
}

/// Scores a candidate. Higher is more similar; the result may be negative.
pub fn similarity_score(source: CandidateSource, diffs: &SimilarityDiffs) -> f64 {
    let mut score = match source {
        CandidateSource::SameArtist => SAME_ARTIST_BONUS,
        CandidateSource::RelatedArtist => RELATED_ARTIST_BONUS,
    };

    match diffs.year_diff {
        Some(d) if d <= 1 => score += 1.5,
        Some(d) if d <= 3 => score += 1.0,
        _ => {}
    }

    if let Some(d) = diffs.popularity_diff {
        score -= f64::from(d) * POPULARITY_PENALTY_PER_POINT;
    }

    if let Some(d) = diffs.duration_diff_sec {
        score -= ((d / 15.0) * 0.5).min(DURATION_PENALTY_CAP);
    }

    if diffs.explicit_mismatch {
        score -= EXPLICIT_MISMATCH_PENALTY;
    }

    score
}

/// Short human-readable explanation of why a candidate was picked.
pub fn reason_summary(source: CandidateSource, diffs: &SimilarityDiffs) -> String {
    let mut reasons = Vec::new();

    if source == CandidateSource::SameArtist {
        reasons.push("same artist");
    } else if source == CandidateSource::RelatedArtist {
        reasons.push("related artist");
    }

    if diffs.year_diff.is_some_and(|d| d <= 2) {
        reasons.push("similar era");
    }
    if diffs.popularity_diff.is_some_and(|d| d <= 10) {
        reasons.push("similar popularity");
    }
    if diffs.duration_diff_sec.is_some_and(|d| d <= 20.0) {
        reasons.push("similar length");
    }

    if reasons.is_empty() {
        "similar by track metadata".to_string()
    } else {
        reasons.join(" · ")
    }
}

/// Deduplicated candidates in discovery order.
///
/// The first occurrence of a track id wins, including its source
/// attribution. The seed track and tracks without an id are never admitted.
#[derive(Debug, Default)]
pub struct CandidatePool {
    seed_id: Option<String>,
    seen: HashSet<String>,
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    pub fn new(seed_id: Option<String>) -> Self {
        Self {
            seed_id,
            seen: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    /// Adds a track; returns `false` if it was rejected.
    pub fn add(
        &mut self,
        track: Track,
        source: CandidateSource,
        source_artist_name: Option<&str>,
    ) -> bool {
        let Some(id) = track.id.as_deref() else {
            return false;
        };
        if self.seed_id.as_deref() == Some(id) || !self.seen.insert(id.to_string()) {
            return false;
        }

        self.candidates.push(Candidate {
            track,
            source,
            source_artist_name: source_artist_name.map(str::to_string),
        });
        true
    }

    pub fn extend(
        &mut self,
        tracks: impl IntoIterator<Item = Track>,
        source: CandidateSource,
        source_artist_name: Option<&str>,
    ) {
        for track in tracks {
            self.add(track, source, source_artist_name);
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Scores every candidate against the seed and returns the best `limit`.
    ///
    /// Equal scores keep discovery order.
    pub fn rank(self, seed: &TrackSignals, limit: usize) -> Vec<Recommendation> {
        let mut scored: Vec<(Candidate, SimilarityDiffs, f64)> = self
            .candidates
            .into_iter()
            .map(|c| {
                let diffs = SimilarityDiffs::between(seed, &TrackSignals::from(&c.track));
                let score = similarity_score(c.source, &diffs);
                (c, diffs, score)
            })
            .collect();

        scored.sort_by(|a, b| b.2.total_cmp(&a.2));

        scored
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(idx, (candidate, diffs, score))| {
                let track = &candidate.track;
                Recommendation {
                    rank: idx + 1,
                    track_id: track.id.clone().unwrap_or_default(),
                    track_name: track.name.clone(),
                    artist_name: track
                        .artist_names()
                        .unwrap_or_else(|| "Unknown artist".to_string()),
                    album_name: track
                        .album_name()
                        .unwrap_or_else(|| "Unknown album".to_string()),
                    album_image: track.album_image(),
                    popularity: track.popularity,
                    duration_formatted: utils::format_duration_ms(track.duration_ms),
                    release_year: track.release_year(),
                    source_artist_name: candidate.source_artist_name.clone(),
                    score,
                    reason_summary: reason_summary(candidate.source, &diffs),
                }
            })
            .collect()
    }
}

/// Recommends tracks similar to the best track match of `query`.
///
/// Fails with a validation error when the seed has no primary artist. Lookup
/// failures for top tracks or related artists only shrink the pool.
pub async fn song_similarity(
    catalog: &dyn CatalogSource,
    query: Option<&str>,
) -> Result<SimilarityReport, ApiError> {
    let query = require_query(query, "song name or query")?;

    let seed = catalog
        .search_tracks(query, 1, None)
        .await
        .map_err(|e| ApiError::from_catalog(e, "Failed to search track"))?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("No track found for that query"))?;

    let seed_artist = seed.artists.first();
    let Some(seed_artist_id) = seed_artist.and_then(|a| a.id.as_deref()) else {
        return Err(ApiError::validation(
            "Seed track has no primary artist; cannot compute similarity.",
        ));
    };
    let seed_artist_name = seed_artist.and_then(|a| a.name.as_deref());

    let (top_tracks, related) = tokio::join!(
        catalog.artist_top_tracks(seed_artist_id, DEFAULT_MARKET),
        catalog.related_artists(seed_artist_id)
    );

    let same_artist_tracks = top_tracks.unwrap_or_else(|e| {
        warning!("Song Similarity: artist top tracks error: {}", e);
        Vec::new()
    });
    let related_artists = related.unwrap_or_else(|e| {
        warning!("Song Similarity: related artists error: {}", e);
        Vec::new()
    });

    let related_blocks = join_all(
        related_artists
            .into_iter()
            .take(RELATED_ARTIST_LIMIT)
            .map(|artist| related_top_tracks(catalog, artist)),
    )
    .await;

    let mut pool = CandidatePool::new(seed.id.clone());
    pool.extend(
        same_artist_tracks,
        CandidateSource::SameArtist,
        seed_artist_name,
    );
    for (artist, tracks) in related_blocks.into_iter().flatten() {
        pool.extend(
            tracks,
            CandidateSource::RelatedArtist,
            artist.name.as_deref(),
        );
    }

    let recommendations = pool.rank(&TrackSignals::from(&seed), RECOMMENDATION_LIMIT);

    Ok(SimilarityReport {
        seed_track: SeedTrack::from(&seed),
        recommendations,
    })
}

async fn related_top_tracks(
    catalog: &dyn CatalogSource,
    artist: Artist,
) -> Option<(Artist, Vec<Track>)> {
    let id = artist.id.clone()?;
    match catalog.artist_top_tracks(&id, DEFAULT_MARKET).await {
        Ok(tracks) => Some((artist, tracks)),
        Err(e) => {
            warning!(
                "Song Similarity: related artist top-tracks error for {}: {}",
                id,
                e
            );
            None
        }
    }
}
