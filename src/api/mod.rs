//! # API Module
//!
//! HTTP handlers for the three TrackIQ services, built on
//! [Axum](https://docs.rs/axum). Shared state reaches the handlers through
//! `Extension` layers added in [`crate::server`].
//!
//! - [`stats`] - aggregation endpoints of the main service (`/api/...`)
//! - [`proxy`] - Spotify pass-through endpoints and the app-token endpoint
//! - [`registry`] - service directory CRUD
//! - [`health`] - liveness endpoint mounted by every service
//!
//! Failures are reported through [`ApiError`], which renders as
//! `{"error": message}` with the matching status code.

mod error;
mod health;
pub mod proxy;
pub mod registry;
pub mod stats;

pub use error::ApiError;
pub use health::health;
