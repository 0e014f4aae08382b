//! Configuration management for TrackIQ.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage service
//! addresses, Spotify credentials and the locations of sibling services.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

const DEFAULT_MAIN_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_PROXY_ADDR: &str = "127.0.0.1:8081";
const DEFAULT_REGISTRY_ADDR: &str = "127.0.0.1:8082";
const DEFAULT_SPOTIFY_AUTH_BASE_URL: &str = "http://localhost:8081";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_INSTANCE_NAME: &str = "service-registry";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `trackiq` data directory if it doesn't exist and loads
/// variables from `trackiq/.env` inside it:
/// - Linux: `~/.local/share/trackiq/.env`
/// - macOS: `~/Library/Application Support/trackiq/.env`
/// - Windows: `%LOCALAPPDATA%/trackiq/.env`
///
/// Variables already present in the process environment are not overridden.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the `.env` file
/// cannot be read or parsed. Callers treat a missing file as a warning, since
/// every setting can also come from the process environment.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("trackiq/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("{} ({})", e, path.display()))
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Bind address of the aggregation service (`TRACKIQ_ADDR`, default `127.0.0.1:8080`).
pub fn main_addr() -> String {
    var_or("TRACKIQ_ADDR", DEFAULT_MAIN_ADDR)
}

/// Bind address of the Spotify proxy (`SPOTIFY_AUTH_ADDR`, default `127.0.0.1:8081`).
pub fn proxy_addr() -> String {
    var_or("SPOTIFY_AUTH_ADDR", DEFAULT_PROXY_ADDR)
}

/// Bind address of the service registry (`REGISTRY_ADDR`, default `127.0.0.1:8082`).
pub fn registry_addr() -> String {
    var_or("REGISTRY_ADDR", DEFAULT_REGISTRY_ADDR)
}

/// Base URL the aggregation service uses to reach the proxy.
///
/// Reads `SPOTIFY_AUTH_BASE_URL`; trailing slashes are stripped so paths can
/// be appended directly.
///
/// # Example
///
/// ```
/// let base = spotify_auth_base_url(); // e.g., "http://localhost:8081"
/// ```
pub fn spotify_auth_base_url() -> String {
    var_or("SPOTIFY_AUTH_BASE_URL", DEFAULT_SPOTIFY_AUTH_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Base URL of a running service registry, if services should announce themselves.
///
/// Reads `REGISTRY_URL`. When unset, self-registration is skipped.
pub fn registry_url() -> Option<String> {
    non_empty_var("REGISTRY_URL").map(|url| url.trim_end_matches('/').to_string())
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the Spotify OAuth token URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the Spotify application client ID (`SPOTIFY_CLIENT_ID`), if set.
pub fn spotify_client_id() -> Option<String> {
    non_empty_var("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify application client secret (`SPOTIFY_CLIENT_SECRET`), if set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    non_empty_var("SPOTIFY_CLIENT_SECRET")
}

/// Name the registry reports for itself in its status and logs (`INSTANCE_NAME`).
pub fn instance_name() -> String {
    var_or("INSTANCE_NAME", DEFAULT_INSTANCE_NAME)
}
