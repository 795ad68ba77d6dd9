//! HTTP API for doccat.
//!
//! Exposes directory merges, file listings, downloads and upload
//! workspaces over a JSON API built on Axum. The merge engine itself lives
//! in the [`doccat`] crate; this crate only adapts it to HTTP.
//!
//! ```no_run
//! use doccat_server::{ServerConfig, start_server};
//!
//! # async fn run() -> anyhow::Result<()> {
//! start_server(ServerConfig::default().with_address("127.0.0.1", 8080)).await
//! # }
//! ```

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{CorsConfig, ServerConfig, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::{AppState, ServerContext};
