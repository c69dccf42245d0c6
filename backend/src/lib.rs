//! File storage backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Object storage gateway
pub mod file_storage;

/// Handler modules
pub mod handlers;

/// HTTP server setup
pub mod server;

/// Application state
pub mod state;

/// Configuration and API error types
pub mod types;
