//! TrackIQ Library
//!
//! This library provides three small HTTP services around the Spotify Web API:
//! a token-brokering proxy, an aggregation service that turns catalog data into
//! display-ready statistics, and an in-memory service registry.
//!
//! # Modules
//!
//! - `analysis` - Aggregation and similarity-scoring pipelines
//! - `api` - HTTP handlers for the three services
//! - `catalog` - Catalog source abstraction and the proxy-backed client
//! - `cli` - Command-line helpers that talk to running services
//! - `config` - Configuration management and environment variables
//! - `management` - Token cache and service directory state
//! - `server` - Router assembly and server bootstrap
//! - `spotify` - Spotify Web API access (token grant, pass-through calls)
//! - `types` - Data structures and type definitions
//! - `utils` - Derived-stat helpers (tiers, durations, moods)
//!
//! # Example
//!
//! ```
//! use trackiq::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> trackiq::Res<()> {
//!     config::load_env().await?;
//!     server::start_main_server(config::main_addr()).await
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by bootstrap code (configuration loading, binding, serving) where
/// errors are only reported, never matched on.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Registered {} services", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used during startup, where nothing can be served without the failed
/// step (unparsable bind address, occupied port). Request handlers never call
/// this macro.
///
/// # Example
///
/// ```
/// error!("Failed to parse server address: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: failed upstream calls, degraded results,
/// unreachable registry.
///
/// # Example
///
/// ```
/// warning!("Related artist lookup failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
