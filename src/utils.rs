use std::fmt;

use crate::types::{ArtistRef, AudioFeatures, Image};

/// Coarse popularity bucket derived from a 0–100 popularity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PopularityTier {
    Unknown,
    Niche,
    Emerging,
    Mainstream,
    GlobalHit,
}

impl PopularityTier {
    pub fn label(self) -> &'static str {
        match self {
            PopularityTier::Unknown => "Unknown",
            PopularityTier::Niche => "Niche/underground",
            PopularityTier::Emerging => "Emerging artist",
            PopularityTier::Mainstream => "Mainstream",
            PopularityTier::GlobalHit => "Global hit",
        }
    }
}

impl fmt::Display for PopularityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn popularity_tier(popularity: Option<u32>) -> PopularityTier {
    match popularity {
        None => PopularityTier::Unknown,
        Some(p) if p >= 80 => PopularityTier::GlobalHit,
        Some(p) if p >= 60 => PopularityTier::Mainstream,
        Some(p) if p >= 40 => PopularityTier::Emerging,
        Some(_) => PopularityTier::Niche,
    }
}

/// Formats a duration as `"M:SS"`, or `"H hr M min"` from one hour up.
///
/// The input is rounded to the nearest whole second before splitting, so
/// `59_500` ms renders as `"1:00"`.
pub fn format_duration_ms(duration_ms: Option<u64>) -> Option<String> {
    let total_seconds = duration_ms?.saturating_add(500) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        Some(format!("{} hr {} min", hours, minutes))
    } else {
        Some(format!("{}:{:02}", minutes, seconds))
    }
}

/// Labels the mood of a track from its audio features.
///
/// Rules are checked in a fixed order and the first match wins; several
/// rules overlap, so the order is part of the result.
pub fn mood_label(features: &AudioFeatures) -> &'static str {
    let (Some(energy), Some(danceability), Some(valence), Some(acousticness)) = (
        features.energy,
        features.danceability,
        features.valence,
        features.acousticness,
    ) else {
        return "mood unavailable (no audio features)";
    };

    if energy > 0.7 && danceability > 0.6 && valence > 0.6 {
        "high-energy, happy, and danceable"
    } else if energy < 0.4 && acousticness > 0.5 && valence < 0.5 {
        "chill, acoustic, and a bit moody"
    } else if valence < 0.3 {
        "sad / emotional"
    } else if energy > 0.8 {
        "very energetic / hype"
    } else {
        "balanced / mixed vibe"
    }
}

/// Parses the year from the leading four characters of a release date
/// (`"2020-05-01"`, `"2020-05"` or `"2020"`).
pub fn parse_release_year(release_date: &str) -> Option<i32> {
    release_date.get(..4)?.parse().ok()
}

pub fn join_artist_names(artists: &[ArtistRef]) -> Option<String> {
    let names: Vec<&str> = artists
        .iter()
        .filter_map(|a| a.name.as_deref())
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// URL of the first (largest) image, if any.
pub fn first_image(images: &[Image]) -> Option<String> {
    images.first().and_then(|i| i.url.clone())
}

pub fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Some(sum as f64 / values.len() as f64)
}

/// Median of the values; an even count averages the two middle values.
pub fn median(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    } else {
        Some(f64::from(sorted[mid]))
    }
}
