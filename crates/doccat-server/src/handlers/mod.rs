//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for a specific API area. Handlers are
//! thin wrappers that run the doccat library on the blocking pool.

pub mod download;
pub mod files;
pub mod merge;
pub mod workspace;
