use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use trackiq::analysis::{
    CandidatePool, CandidateSource, TrackSignals, aggregate_album, album_analysis, artist_stats,
    song_similarity, song_stats, trend_analytics,
};
use trackiq::api::ApiError;
use trackiq::catalog::{CatalogError, CatalogSource};
use trackiq::types::{
    Album, AlbumRef, AlbumTrack, Artist, ArtistRef, AudioFeatures, Followers, Paging, Track,
};

/// In-memory catalog. Lookups of unknown ids fail with a 404 status.
#[derive(Default)]
struct FakeCatalog {
    track_search: Vec<Track>,
    search_status: Option<u16>,
    album_search: Vec<Album>,
    artist_search: Vec<Artist>,
    albums: HashMap<String, Album>,
    tracks: HashMap<String, Track>,
    features: HashMap<String, AudioFeatures>,
    artists: HashMap<String, Artist>,
    top_tracks: HashMap<String, Vec<Track>>,
    related: HashMap<String, Vec<Artist>>,
    artist_albums: HashMap<String, Paging<Album>>,
    searched_markets: Mutex<Vec<Option<String>>>,
}

fn not_found(what: &str) -> CatalogError {
    CatalogError::Status {
        status: 404,
        body: format!("{{\"error\":\"{} not found\"}}", what),
    }
}

fn lookup<T: Clone>(map: &HashMap<String, T>, id: &str) -> Result<T, CatalogError> {
    map.get(id).cloned().ok_or_else(|| not_found(id))
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn search_tracks(
        &self,
        _query: &str,
        _limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<Track>, CatalogError> {
        if let Ok(mut markets) = self.searched_markets.lock() {
            markets.push(market.map(str::to_string));
        }
        if let Some(status) = self.search_status {
            return Err(CatalogError::Status {
                status,
                body: "upstream down".to_string(),
            });
        }
        Ok(self.track_search.clone())
    }

    async fn search_albums(&self, _query: &str) -> Result<Vec<Album>, CatalogError> {
        Ok(self.album_search.clone())
    }

    async fn search_artists(&self, _query: &str, _limit: u32) -> Result<Vec<Artist>, CatalogError> {
        Ok(self.artist_search.clone())
    }

    async fn album(&self, id: &str) -> Result<Album, CatalogError> {
        lookup(&self.albums, id)
    }

    async fn track(&self, id: &str) -> Result<Track, CatalogError> {
        lookup(&self.tracks, id)
    }

    async fn audio_features(&self, id: &str) -> Result<AudioFeatures, CatalogError> {
        lookup(&self.features, id)
    }

    async fn artist(&self, id: &str) -> Result<Artist, CatalogError> {
        lookup(&self.artists, id)
    }

    async fn artist_top_tracks(&self, id: &str, _market: &str) -> Result<Vec<Track>, CatalogError> {
        lookup(&self.top_tracks, id)
    }

    async fn related_artists(&self, id: &str) -> Result<Vec<Artist>, CatalogError> {
        lookup(&self.related, id)
    }

    async fn artist_albums(
        &self,
        id: &str,
        _include_groups: &str,
        _limit: u32,
    ) -> Result<Paging<Album>, CatalogError> {
        lookup(&self.artist_albums, id)
    }
}

// Helper function to create a test track
fn create_test_track(
    id: &str,
    artist: (&str, &str),
    popularity: Option<u32>,
    duration_ms: Option<u64>,
    release_date: &str,
    explicit: Option<bool>,
) -> Track {
    Track {
        id: Some(id.to_string()),
        name: Some(format!("Track {}", id)),
        artists: vec![ArtistRef {
            id: Some(artist.0.to_string()),
            name: Some(artist.1.to_string()),
        }],
        album: Some(AlbumRef {
            id: Some(format!("{}_album", id)),
            name: Some(format!("Album of {}", id)),
            images: Vec::new(),
            release_date: Some(release_date.to_string()),
        }),
        popularity,
        duration_ms,
        explicit,
        ..Default::default()
    }
}

fn simple_track(id: &str, artist: (&str, &str), popularity: u32) -> Track {
    create_test_track(id, artist, Some(popularity), Some(200_000), "2020-01-01", Some(false))
}

fn create_test_artist(id: &str, name: &str) -> Artist {
    Artist {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn album_track(name: &str, popularity: Option<u32>, duration_ms: u64) -> AlbumTrack {
    AlbumTrack {
        rank: 0,
        name: name.to_string(),
        artist_name: "Test Artist".to_string(),
        popularity,
        duration_ms: Some(duration_ms),
        duration_formatted: None,
        disc_number: Some(1),
        track_number: None,
    }
}

const SEED_ARTIST: (&str, &str) = ("artist_seed", "Seed Artist");
const RELATED_ARTIST: (&str, &str) = ("artist_related", "Related Artist");

// ---------------------------------------------------------------------------
// Song similarity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_close_same_artist_track_beats_distant_related_track() {
    let seed = create_test_track(
        "seed",
        SEED_ARTIST,
        Some(70),
        Some(200_000),
        "2020-03-01",
        Some(false),
    );
    let a = create_test_track(
        "a",
        SEED_ARTIST,
        Some(75),
        Some(205_000),
        "2021-06-01",
        Some(false),
    );
    let b = create_test_track(
        "b",
        RELATED_ARTIST,
        Some(30),
        Some(260_000),
        "2010-01-01",
        Some(true),
    );

    let mut catalog = FakeCatalog {
        track_search: vec![seed.clone()],
        ..Default::default()
    };
    catalog
        .top_tracks
        .insert(SEED_ARTIST.0.to_string(), vec![seed.clone(), a.clone()]);
    catalog.related.insert(
        SEED_ARTIST.0.to_string(),
        vec![create_test_artist(RELATED_ARTIST.0, RELATED_ARTIST.1)],
    );
    // `a` shows up again among the related artist's tracks; the first sighting wins
    catalog
        .top_tracks
        .insert(RELATED_ARTIST.0.to_string(), vec![b.clone(), a.clone()]);

    let report = song_similarity(&catalog, Some("seed song")).await.unwrap();

    assert_eq!(report.seed_track.track_id.as_deref(), Some("seed"));
    assert_eq!(report.seed_track.release_year, Some(2020));
    assert_eq!(report.recommendations.len(), 2);

    let first = &report.recommendations[0];
    let second = &report.recommendations[1];
    assert_eq!(first.track_id, "a");
    assert_eq!(first.rank, 1);
    assert_eq!(first.source_artist_name.as_deref(), Some("Seed Artist"));
    assert!(first.reason_summary.starts_with("same artist"));
    assert_eq!(second.track_id, "b");
    assert_eq!(second.rank, 2);
    assert_eq!(second.source_artist_name.as_deref(), Some("Related Artist"));
    assert!(first.score > second.score);
    assert!((first.score - (4.5 - 0.15 - 5.0 / 30.0)).abs() < 1e-9);
    assert!((second.score - (2.0 - 1.2 - 2.0 - 0.5)).abs() < 1e-9);
}

#[tokio::test]
async fn test_similarity_never_recommends_seed() {
    let seed = simple_track("seed", SEED_ARTIST, 50);
    let mut catalog = FakeCatalog {
        track_search: vec![seed.clone()],
        ..Default::default()
    };
    catalog
        .top_tracks
        .insert(SEED_ARTIST.0.to_string(), vec![seed.clone(), seed.clone()]);
    catalog.related.insert(SEED_ARTIST.0.to_string(), Vec::new());

    let report = song_similarity(&catalog, Some("seed")).await.unwrap();

    assert!(report.recommendations.is_empty());
}

#[tokio::test]
async fn test_similarity_degrades_when_lookups_fail() {
    let seed = simple_track("seed", SEED_ARTIST, 50);
    let mut catalog = FakeCatalog {
        track_search: vec![seed],
        ..Default::default()
    };
    // no top tracks for the seed artist: that lookup fails
    catalog.related.insert(
        SEED_ARTIST.0.to_string(),
        vec![
            create_test_artist("r1", "First"),
            create_test_artist("r2", "Second"),
            create_test_artist("r3", "Third"),
            create_test_artist("r4", "Fourth"),
        ],
    );
    catalog.top_tracks.insert(
        "r1".to_string(),
        vec![simple_track("t1", ("r1", "First"), 50), simple_track("t2", ("r1", "First"), 50)],
    );
    // r2 has no top tracks: skipped
    catalog
        .top_tracks
        .insert("r3".to_string(), vec![simple_track("t3", ("r3", "Third"), 50)]);
    // only the first three related artists are consulted
    catalog
        .top_tracks
        .insert("r4".to_string(), vec![simple_track("t4", ("r4", "Fourth"), 50)]);

    let report = song_similarity(&catalog, Some("seed")).await.unwrap();

    let ids: Vec<&str> = report
        .recommendations
        .iter()
        .map(|r| r.track_id.as_str())
        .collect();
    assert_eq!(ids, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn test_similarity_returns_at_most_five() {
    let seed = simple_track("seed", SEED_ARTIST, 50);
    let mut catalog = FakeCatalog {
        track_search: vec![seed],
        ..Default::default()
    };
    let same: Vec<Track> = (0..8)
        .map(|i| simple_track(&format!("s{}", i), SEED_ARTIST, 50 + i))
        .collect();
    catalog.top_tracks.insert(SEED_ARTIST.0.to_string(), same);
    catalog.related.insert(SEED_ARTIST.0.to_string(), Vec::new());

    let report = song_similarity(&catalog, Some("seed")).await.unwrap();

    assert_eq!(report.recommendations.len(), 5);
    let ranks: Vec<usize> = report.recommendations.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    assert!(
        report
            .recommendations
            .windows(2)
            .all(|w| w[0].score >= w[1].score)
    );
}

#[tokio::test]
async fn test_similarity_requires_primary_artist() {
    let mut seed = simple_track("seed", SEED_ARTIST, 50);
    seed.artists.clear();
    let catalog = FakeCatalog {
        track_search: vec![seed],
        ..Default::default()
    };

    let err = song_similarity(&catalog, Some("seed")).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        err.to_string(),
        "Seed track has no primary artist; cannot compute similarity."
    );
}

#[test]
fn test_same_artist_outranks_identical_related_track() {
    let seed = TrackSignals::from(&simple_track("seed", SEED_ARTIST, 60));
    let mut pool = CandidatePool::new(Some("seed".to_string()));
    assert!(pool.add(
        simple_track("related", RELATED_ARTIST, 60),
        CandidateSource::RelatedArtist,
        Some(RELATED_ARTIST.1),
    ));
    assert!(pool.add(
        simple_track("same", SEED_ARTIST, 60),
        CandidateSource::SameArtist,
        Some(SEED_ARTIST.1),
    ));

    let ranked = pool.rank(&seed, 5);

    assert_eq!(ranked[0].track_id, "same");
    assert_eq!(ranked[1].track_id, "related");
    assert!(ranked[0].score - ranked[1].score >= 1.0);
}

#[test]
fn test_candidate_pool_rejects_seed_and_duplicates() {
    let mut pool = CandidatePool::new(Some("seed".to_string()));
    assert!(!pool.add(simple_track("seed", SEED_ARTIST, 50), CandidateSource::SameArtist, None));
    assert!(pool.add(simple_track("x", SEED_ARTIST, 50), CandidateSource::SameArtist, None));
    assert!(!pool.add(simple_track("x", RELATED_ARTIST, 50), CandidateSource::RelatedArtist, None));

    let mut no_id = simple_track("y", SEED_ARTIST, 50);
    no_id.id = None;
    assert!(!pool.add(no_id, CandidateSource::SameArtist, None));

    assert_eq!(pool.len(), 1);
    assert_eq!(pool.candidates()[0].source, CandidateSource::SameArtist);
}

#[test]
fn test_equal_scores_keep_discovery_order() {
    let seed = TrackSignals::from(&simple_track("seed", SEED_ARTIST, 60));
    let mut pool = CandidatePool::new(None);
    pool.extend(
        vec![
            simple_track("first", RELATED_ARTIST, 60),
            simple_track("second", RELATED_ARTIST, 60),
            simple_track("third", RELATED_ARTIST, 60),
        ],
        CandidateSource::RelatedArtist,
        Some(RELATED_ARTIST.1),
    );

    let ids: Vec<String> = pool.rank(&seed, 5).into_iter().map(|r| r.track_id).collect();

    assert_eq!(ids, vec!["first", "second", "third"]);
}

// ---------------------------------------------------------------------------
// Album analyzer
// ---------------------------------------------------------------------------

#[test]
fn test_album_stats_odd_count() {
    let aggregate = aggregate_album(vec![
        album_track("a", Some(60), 1_000),
        album_track("b", Some(80), 1_000),
        album_track("c", Some(40), 1_000),
    ]);

    assert_eq!(aggregate.avg_popularity, Some(60.0));
    assert_eq!(aggregate.median_popularity, Some(60.0));
    assert_eq!(aggregate.top_track_name.as_deref(), Some("b"));
    assert_eq!(aggregate.top_track_popularity, Some(80));
}

#[test]
fn test_album_stats_even_count() {
    let aggregate = aggregate_album(vec![
        album_track("a", Some(80), 1_000),
        album_track("b", Some(60), 1_000),
        album_track("c", Some(40), 1_000),
        album_track("d", Some(20), 1_000),
    ]);

    assert_eq!(aggregate.avg_popularity, Some(50.0));
    assert_eq!(aggregate.median_popularity, Some(50.0));
}

#[test]
fn test_album_stats_skip_missing_popularity() {
    let aggregate = aggregate_album(vec![
        album_track("unrated", None, 30_000),
        album_track("a", Some(80), 60_000),
        album_track("b", Some(60), 60_000),
        album_track("c", Some(40), 60_000),
    ]);

    assert_eq!(aggregate.total_tracks, 4);
    assert_eq!(aggregate.total_duration_ms, 210_000);
    assert_eq!(aggregate.total_duration_formatted.as_deref(), Some("3:30"));
    assert_eq!(aggregate.avg_popularity, Some(60.0));
    assert_eq!(aggregate.median_popularity, Some(60.0));

    let order: Vec<(&str, usize)> = aggregate
        .tracks
        .iter()
        .map(|t| (t.name.as_str(), t.rank))
        .collect();
    assert_eq!(order, vec![("a", 1), ("b", 2), ("c", 3), ("unrated", 4)]);
}

#[test]
fn test_empty_album_has_no_stats() {
    let aggregate = aggregate_album(Vec::new());

    assert_eq!(aggregate.total_tracks, 0);
    assert_eq!(aggregate.total_duration_ms, 0);
    assert_eq!(aggregate.avg_popularity, None);
    assert_eq!(aggregate.median_popularity, None);
    assert_eq!(aggregate.top_track_name, None);
}

fn album_catalog() -> FakeCatalog {
    let stubs: Vec<Track> = ["t1", "t2", "t3", "t4", "t5"]
        .iter()
        .enumerate()
        .map(|(idx, id)| Track {
            id: Some(id.to_string()),
            name: Some(format!("Stub {}", id)),
            track_number: Some(idx as u32 + 1),
            duration_ms: Some(180_000),
            ..Default::default()
        })
        .collect();

    let album = Album {
        id: Some("album1".to_string()),
        name: Some("Test Album".to_string()),
        artists: vec![ArtistRef {
            id: Some(SEED_ARTIST.0.to_string()),
            name: Some(SEED_ARTIST.1.to_string()),
        }],
        release_date: Some("2019-10-04".to_string()),
        label: Some("Test Label".to_string()),
        images: Vec::new(),
        tracks: Some(Paging {
            items: stubs,
            total: Some(5),
        }),
    };

    let mut catalog = FakeCatalog {
        album_search: vec![Album {
            id: Some("album1".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    catalog.albums.insert("album1".to_string(), album);
    // t5 has no full record: its lookup fails and it is dropped
    for (id, popularity) in [("t1", 20), ("t2", 80), ("t3", 40), ("t4", 60)] {
        catalog
            .tracks
            .insert(id.to_string(), simple_track(id, SEED_ARTIST, popularity));
    }
    catalog
}

#[tokio::test]
async fn test_album_analysis_pipeline() {
    let catalog = album_catalog();

    let analysis = album_analysis(&catalog, Some("test album")).await.unwrap();

    assert_eq!(analysis.album_id, "album1");
    assert_eq!(analysis.album_name.as_deref(), Some("Test Album"));
    assert_eq!(analysis.artists.as_deref(), Some("Seed Artist"));
    assert_eq!(analysis.label.as_deref(), Some("Test Label"));
    assert_eq!(analysis.release_year, Some(2019));
    assert_eq!(analysis.aggregate.total_tracks, 4);
    assert_eq!(analysis.aggregate.avg_popularity, Some(50.0));
    assert_eq!(analysis.aggregate.median_popularity, Some(50.0));

    let top = &analysis.aggregate.tracks[0];
    assert_eq!(top.rank, 1);
    assert_eq!(top.popularity, Some(80));
    assert_eq!(top.name, "Track t2");
    // the full record has no track number, so the stub fills it in
    assert_eq!(top.track_number, Some(2));
}

#[tokio::test]
async fn test_album_analysis_errors() {
    let catalog = FakeCatalog::default();
    let err = album_analysis(&catalog, None).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = album_analysis(&catalog, Some("nothing")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "No album found for that query");

    let mut catalog = album_catalog();
    catalog.albums.clear();
    let err = album_analysis(&catalog, Some("test album")).await.unwrap_err();
    assert!(matches!(err, ApiError::Upstream { status: 404, .. }));
    assert_eq!(err.to_string(), "Failed to fetch album details");
}

// ---------------------------------------------------------------------------
// Song stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_song_stats_view() {
    let mut track = create_test_track(
        "song",
        SEED_ARTIST,
        Some(85),
        Some(65_000),
        "2018-02-02",
        None,
    );
    track.available_markets = Some(vec!["US".to_string(), "GB".to_string()]);

    let mut catalog = FakeCatalog {
        track_search: vec![track],
        ..Default::default()
    };
    catalog.features.insert(
        "song".to_string(),
        AudioFeatures {
            energy: Some(0.9),
            danceability: Some(0.8),
            valence: Some(0.9),
            acousticness: Some(0.1),
        },
    );

    let stats = song_stats(&catalog, Some("song")).await.unwrap();

    assert_eq!(stats.track_name.as_deref(), Some("Track song"));
    assert_eq!(stats.artist_name.as_deref(), Some("Seed Artist"));
    assert_eq!(stats.popularity_tier, "Global hit");
    assert_eq!(stats.duration_formatted.as_deref(), Some("1:05"));
    assert_eq!(stats.release_year, Some(2018));
    assert!(!stats.explicit);
    assert_eq!(stats.markets_count, Some(2));
    assert_eq!(stats.mood_label, "high-energy, happy, and danceable");
}

#[tokio::test]
async fn test_song_stats_without_audio_features() {
    let catalog = FakeCatalog {
        track_search: vec![simple_track("song", SEED_ARTIST, 30)],
        ..Default::default()
    };

    let stats = song_stats(&catalog, Some("song")).await.unwrap();

    assert_eq!(stats.popularity_tier, "Niche/underground");
    assert_eq!(stats.mood_label, "mood unavailable (no audio features)");
}

#[tokio::test]
async fn test_song_stats_errors() {
    let catalog = FakeCatalog::default();

    let err = song_stats(&catalog, Some("   ")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = song_stats(&catalog, Some("nothing")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "No track found for that query");

    let catalog = FakeCatalog {
        search_status: Some(503),
        ..Default::default()
    };
    let err = song_stats(&catalog, Some("song")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(err.to_string(), "Failed to search track");
}

// ---------------------------------------------------------------------------
// Trend analytics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_trend_analytics_uses_requested_market() {
    let catalog = FakeCatalog {
        track_search: vec![
            simple_track("t1", SEED_ARTIST, 40),
            simple_track("t2", SEED_ARTIST, 90),
        ],
        ..Default::default()
    };

    let report = trend_analytics(&catalog, Some("de")).await.unwrap();

    assert_eq!(report.display_country, "Germany");
    assert_eq!(report.market, "DE");
    assert_eq!(report.window, "2020-2025");
    assert_eq!(report.avg_popularity, Some(65.0));
    assert_eq!(report.avg_release_year, Some(2020));
    assert_eq!(report.top_tracks[0].track_name, "Track t2");

    let markets = catalog.searched_markets.lock().unwrap();
    assert_eq!(markets.as_slice(), &[Some("DE".to_string())]);
}

#[tokio::test]
async fn test_trend_analytics_without_results() {
    let catalog = FakeCatalog::default();

    let err = trend_analytics(&catalog, None).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        err.to_string(),
        "No tracks found for this market / time window."
    );
    let markets = catalog.searched_markets.lock().unwrap();
    assert_eq!(markets.as_slice(), &[Some("US".to_string())]);
}

// ---------------------------------------------------------------------------
// Artist stats
// ---------------------------------------------------------------------------

fn artist_catalog() -> FakeCatalog {
    let mut artist = create_test_artist(SEED_ARTIST.0, SEED_ARTIST.1);
    artist.followers = Some(Followers {
        total: Some(123_456),
    });
    artist.popularity = Some(72);
    artist.genres = vec!["indie".to_string(), "dream pop".to_string()];

    let mut catalog = FakeCatalog {
        artist_search: vec![create_test_artist(SEED_ARTIST.0, SEED_ARTIST.1)],
        ..Default::default()
    };
    catalog.artists.insert(SEED_ARTIST.0.to_string(), artist);
    catalog.top_tracks.insert(
        SEED_ARTIST.0.to_string(),
        (0..7)
            .map(|i| simple_track(&format!("top{}", i), SEED_ARTIST, 90 - i))
            .collect(),
    );
    catalog
}

#[tokio::test]
async fn test_artist_stats_view() {
    let mut catalog = artist_catalog();
    catalog.artist_albums.insert(
        SEED_ARTIST.0.to_string(),
        Paging {
            items: vec![Album::default(), Album::default()],
            total: Some(42),
        },
    );

    let stats = artist_stats(&catalog, Some("seed artist")).await.unwrap();

    assert_eq!(stats.artist_id, "artist_seed");
    assert_eq!(stats.name, "Seed Artist");
    assert_eq!(stats.followers, Some(123_456));
    assert_eq!(stats.popularity_tier, "Mainstream");
    assert_eq!(stats.genres, vec!["indie", "dream pop"]);
    assert_eq!(stats.album_count, Some(42));
    assert_eq!(stats.top_tracks.len(), 5);
    assert_eq!(stats.top_tracks[0].name, "Track top0");
    assert_eq!(stats.top_tracks[0].duration_formatted.as_deref(), Some("3:20"));
}

#[tokio::test]
async fn test_artist_stats_album_count_falls_back_to_items() {
    let mut catalog = artist_catalog();
    catalog.artist_albums.insert(
        SEED_ARTIST.0.to_string(),
        Paging {
            items: vec![Album::default(), Album::default(), Album::default()],
            total: None,
        },
    );

    let stats = artist_stats(&catalog, Some("seed artist")).await.unwrap();

    assert_eq!(stats.album_count, Some(3));
}

#[tokio::test]
async fn test_artist_stats_degrade_when_enrichment_fails() {
    let mut catalog = artist_catalog();
    catalog.top_tracks.clear();

    let stats = artist_stats(&catalog, Some("seed artist")).await.unwrap();

    assert_eq!(stats.album_count, None);
    assert!(stats.top_tracks.is_empty());
    assert_eq!(stats.name, "Seed Artist");
}

#[tokio::test]
async fn test_artist_stats_errors() {
    let catalog = FakeCatalog::default();
    let err = artist_stats(&catalog, Some("nobody")).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "No artist found for that query");

    let mut catalog = artist_catalog();
    catalog.artists.clear();
    let err = artist_stats(&catalog, Some("seed artist")).await.unwrap_err();
    assert!(matches!(err, ApiError::Upstream { status: 404, .. }));
    assert_eq!(err.to_string(), "Failed to fetch artist details");
}
