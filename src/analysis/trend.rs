use std::cmp::Reverse;

use crate::{
    analysis::{DEFAULT_MARKET, country_label},
    api::ApiError,
    catalog::CatalogSource,
    types::{Track, TrendReport, TrendTrack},
    utils,
};

/// Release window the trend search covers.
pub const TREND_WINDOW: &str = "2020-2025";
const TREND_SEARCH_LIMIT: u32 = 50;
const TREND_TOP_N: usize = 10;
const GLOBAL_CODE: &str = "GLOBAL";

/// A requested country resolved to a search market and a display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSelection {
    pub code: String,
    pub display_country: String,
    pub market: String,
}

/// Normalizes a country code (trimmed, upper-cased, blank → `GLOBAL`).
///
/// `GLOBAL` searches the US market but keeps "Global" as its label; unknown
/// codes are displayed as-is.
pub fn resolve_market(country: Option<&str>) -> MarketSelection {
    let code = country
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| GLOBAL_CODE.to_string());

    let display_country = country_label(&code)
        .map(str::to_string)
        .unwrap_or_else(|| code.clone());
    let market = if code == GLOBAL_CODE {
        DEFAULT_MARKET.to_string()
    } else {
        code.clone()
    };

    MarketSelection {
        code,
        display_country,
        market,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub top_tracks: Vec<TrendTrack>,
    pub avg_popularity: Option<f64>,
    pub avg_release_year: Option<i32>,
}

/// Keeps the ten most popular tracks and averages their popularity and year.
///
/// Missing popularity sorts as 0; ties keep search order.
pub fn summarize_trend(mut items: Vec<Track>) -> TrendSummary {
    items.sort_by_key(|t| Reverse(t.popularity.unwrap_or(0)));
    items.truncate(TREND_TOP_N);

    let top_tracks: Vec<TrendTrack> = items
        .iter()
        .enumerate()
        .map(|(idx, track)| TrendTrack {
            rank: idx + 1,
            track_name: track
                .name
                .clone()
                .unwrap_or_else(|| "Unknown track".to_string()),
            artist_name: track
                .artist_names()
                .unwrap_or_else(|| "Unknown artist".to_string()),
            popularity: track.popularity,
            release_year: track.release_year(),
            duration_formatted: utils::format_duration_ms(track.duration_ms),
        })
        .collect();

    let popularity: Vec<u32> = top_tracks.iter().filter_map(|t| t.popularity).collect();
    let years: Vec<i32> = top_tracks.iter().filter_map(|t| t.release_year).collect();
    let avg_release_year = if years.is_empty() {
        None
    } else {
        let sum: i64 = years.iter().map(|&y| i64::from(y)).sum();
        Some((sum as f64 / years.len() as f64).round() as i32)
    };

    TrendSummary {
        avg_popularity: utils::mean(&popularity),
        avg_release_year,
        top_tracks,
    }
}

/// Builds the trend view for a country's market.
pub async fn trend_analytics(
    catalog: &dyn CatalogSource,
    country: Option<&str>,
) -> Result<TrendReport, ApiError> {
    let selection = resolve_market(country);
    let query = format!("year:{}", TREND_WINDOW);

    let items = catalog
        .search_tracks(&query, TREND_SEARCH_LIMIT, Some(&selection.market))
        .await
        .map_err(|e| ApiError::from_catalog(e, "Failed to fetch tracks from Spotify"))?;

    if items.is_empty() {
        return Err(ApiError::not_found(
            "No tracks found for this market / time window.",
        ));
    }

    let summary = summarize_trend(items);

    Ok(TrendReport {
        display_country: selection.display_country,
        market: selection.market,
        window: TREND_WINDOW.to_string(),
        avg_popularity: summary.avg_popularity,
        avg_release_year: summary.avg_release_year,
        top_tracks: summary.top_tracks,
    })
}
