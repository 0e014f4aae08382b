//! # Analysis Module
//!
//! The aggregation service's core: each submodule turns a handful of catalog
//! lookups into one display-ready view.
//!
//! | Pipeline        | Lookups                                                    |
//! |-----------------|------------------------------------------------------------|
//! | [`song`]        | track search, audio features                               |
//! | [`album`]       | album search, album, every track (concurrently)            |
//! | [`similarity`]  | track search, top tracks, related artists and their tops   |
//! | [`trend`]       | one 50-track search scoped to a market                     |
//! | [`artist`]      | artist search, artist, albums and top tracks (concurrently)|
//!
//! Every pipeline takes a `&dyn CatalogSource`, so the same code runs against
//! the proxy in production and an in-memory catalog in tests.
//!
//! ## Failure policy
//!
//! Primary lookups (the search and the record it resolves to) abort the
//! request with an [`ApiError`]. Secondary enrichment lookups never do: a
//! failure is logged and the result degrades (fewer candidates, a missing
//! count, an empty sample). Nothing is retried.

pub mod album;
pub mod artist;
mod countries;
pub mod similarity;
pub mod song;
pub mod trend;

pub use album::{aggregate_album, album_analysis, merge_album_track};
pub use artist::artist_stats;
pub use countries::country_label;
pub use similarity::{
    Candidate, CandidatePool, CandidateSource, SimilarityDiffs, TrackSignals, reason_summary,
    similarity_score, song_similarity,
};
pub use song::song_stats;
pub use trend::{MarketSelection, TrendSummary, resolve_market, summarize_trend, trend_analytics};

use crate::api::ApiError;

/// Market used for lookups that are not scoped by the caller.
pub const DEFAULT_MARKET: &str = "US";

/// Returns the trimmed query, or a validation error naming what was expected.
pub(crate) fn require_query<'a>(query: Option<&'a str>, what: &str) -> Result<&'a str, ApiError> {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(ApiError::validation(format!(
            "Missing q query parameter ({})",
            what
        ))),
    }
}
