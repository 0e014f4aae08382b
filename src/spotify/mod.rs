//! # Spotify Integration Module
//!
//! Direct access to Spotify, used only by the proxy service. Everything else
//! in the crate reaches Spotify through the proxy (see [`crate::catalog`]).
//!
//! ## Overview
//!
//! ```text
//! Aggregation service ──HTTP──▶ Proxy service ──▶ Spotify Integration Layer
//!                                                   ├── auth (client-credentials)
//!                                                   └── web  (pass-through GET)
//! ```
//!
//! ### Authentication
//!
//! [`auth`] requests application tokens with the OAuth 2.0 client-credentials
//! grant. No user is involved, so there are no refresh tokens; an expired
//! token is simply replaced. Caching lives in
//! [`crate::management::TokenManager`].
//!
//! ### Web API
//!
//! [`web`] performs authenticated GET requests and returns the JSON body
//! verbatim, or the status and raw body of a failed call.
//!
//! ## Error Handling
//!
//! No request is retried. A failed call is final for the request that
//! triggered it; the proxy maps it to an error envelope carrying the upstream
//! status.

pub mod auth;
pub mod web;
