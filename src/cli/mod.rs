//! # CLI Module
//!
//! Command-line helpers that talk to running TrackIQ services. The server
//! subcommands live in [`crate::server`]; this module holds the commands that
//! act as clients.
//!
//! ```bash
//! trackiq services                  # list every registered service
//! trackiq services --search proxy   # filter by id, name, description or url
//! ```

mod services;

pub use services::services;
