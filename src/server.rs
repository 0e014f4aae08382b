use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{
    Extension, Router,
    routing::{delete, get, post},
};
use reqwest::Client;
use tokio::net::TcpListener;

use crate::{
    Res,
    api::{
        self,
        proxy::{self, ProxyState},
        registry::{self, RegistryState},
        stats::{self, SharedCatalog},
    },
    catalog::ProxyClient,
    config, error, info,
    management::{ServiceDirectory, TokenManager},
    success,
    types::RegisterServiceRequest,
    warning,
};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

/// Routes of the aggregation service.
pub fn main_router(catalog: SharedCatalog) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/song-stats", get(stats::song_stats))
        .route("/api/album-analyzer", get(stats::album_analyzer))
        .route("/api/song-similarity", get(stats::song_similarity))
        .route("/api/trend-analytics", get(stats::trend_analytics))
        .route("/api/artist-stats", get(stats::artist_stats))
        .layer(Extension(catalog))
}

/// Routes of the Spotify proxy and token broker.
pub fn proxy_router(state: ProxyState) -> Router {
    let spotify = Router::new()
        .route("/search", get(proxy::search))
        .route("/search-albums", get(proxy::search_albums))
        .route("/search-artists", get(proxy::search_artists))
        .route("/search-playlists", get(proxy::search_playlists))
        .route("/albums/{id}", get(proxy::album))
        .route("/tracks/{id}", get(proxy::track))
        .route("/audio-features/{id}", get(proxy::audio_features))
        .route("/artists/{id}", get(proxy::artist))
        .route("/artists/{id}/albums", get(proxy::artist_albums))
        .route("/artists/{id}/top-tracks", get(proxy::artist_top_tracks))
        .route("/artists/{id}/related-artists", get(proxy::related_artists));

    Router::new()
        .route("/health", get(api::health))
        .route("/token/app", get(proxy::app_token))
        .nest("/spotify", spotify)
        .layer(Extension(state))
}

/// Routes of the service registry.
pub fn registry_router(state: RegistryState) -> Router {
    Router::new()
        .route("/", get(registry::status))
        .route("/health", get(api::health))
        .route("/services", get(registry::list))
        .route("/services/register", post(registry::register))
        .route("/services/search", get(registry::search))
        .route("/services/{id}", delete(registry::remove))
        .layer(Extension(state))
}

/// Binds a listener, exiting the process if `addr` is not a socket address.
pub async fn bind(addr: &str) -> Res<TcpListener> {
    let addr = match SocketAddr::from_str(addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address {}: {}", addr, e),
    };

    Ok(TcpListener::bind(addr).await?)
}

pub async fn start_main_server(addr: String) -> Res<()> {
    serve_main(bind(&addr).await?).await
}

pub async fn start_proxy_server(addr: String) -> Res<()> {
    serve_proxy(bind(&addr).await?).await
}

pub async fn start_registry_server(addr: String) -> Res<()> {
    serve_registry(bind(&addr).await?).await
}

/// Runs all three services in one process.
///
/// Every listener is bound before any service starts, so the self-registration
/// of the main and proxy services finds the registry accepting connections.
pub async fn start_all() -> Res<()> {
    let main = bind(&config::main_addr()).await?;
    let proxy = bind(&config::proxy_addr()).await?;
    let registry = bind(&config::registry_addr()).await?;

    tokio::try_join!(serve_main(main), serve_proxy(proxy), serve_registry(registry))?;
    Ok(())
}

pub async fn serve_main(listener: TcpListener) -> Res<()> {
    let local = listener.local_addr()?;
    let client = ProxyClient::new(config::spotify_auth_base_url());

    success!("TrackIQ main service listening on http://{}", local);
    info!("Using Spotify proxy at {}", client.base_url());
    let catalog: SharedCatalog = Arc::new(client);
    tokio::spawn(announce(
        "trackiq-main",
        "TrackIQ main service",
        "Song, album, artist and trend statistics",
        local,
    ));

    axum::serve(listener, main_router(catalog)).await?;
    Ok(())
}

pub async fn serve_proxy(listener: TcpListener) -> Res<()> {
    let local = listener.local_addr()?;
    if config::spotify_client_id().is_none() || config::spotify_client_secret().is_none() {
        warning!("SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET is not set; token requests will fail");
    }

    success!("Spotify proxy listening on http://{}", local);
    tokio::spawn(announce(
        "spotify-auth",
        "Spotify auth proxy",
        "Client-credentials token broker and Spotify Web API pass-through",
        local,
    ));

    let state = ProxyState::new(TokenManager::new());
    axum::serve(listener, proxy_router(state)).await?;
    Ok(())
}

pub async fn serve_registry(listener: TcpListener) -> Res<()> {
    let local = listener.local_addr()?;
    let state = RegistryState {
        directory: ServiceDirectory::new(),
        instance: config::instance_name(),
    };

    success!("Service registry {} listening on http://{}", state.instance, local);
    tokio::spawn(heartbeat(state.clone()));

    axum::serve(listener, registry_router(state)).await?;
    Ok(())
}

async fn heartbeat(state: RegistryState) {
    let mut ticker = tokio::time::interval(HEARTBEAT_INTERVAL);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        info!(
            "[{}] heartbeat: {} registered services",
            state.instance,
            state.directory.len().await
        );
    }
}

/// Registers this service with the registry named by `REGISTRY_URL`, if any.
async fn announce(id: &str, name: &str, description: &str, local: SocketAddr) {
    let Some(registry_url) = config::registry_url() else {
        return;
    };

    let request = RegisterServiceRequest {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        description: Some(description.to_string()),
        url: Some(format!("http://{}", local)),
    };

    let result = Client::new()
        .post(format!("{}/services/register", registry_url))
        .json(&request)
        .send()
        .await
        .and_then(|res| res.error_for_status());

    match result {
        Ok(_) => info!("Registered {} with {}", id, registry_url),
        Err(e) => warning!("Could not register {} with {}: {}", id, registry_url, e),
    }
}
