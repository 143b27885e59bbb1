//! # Pings Server
//!
//! A small HTTP API server built with Rust, Axum, and Tokio that records
//! device "ping" events in MongoDB and answers historical queries over them.
//!
//! ## Features
//! - Async/await HTTP server using the Axum framework
//! - Structured logging with tracing
//! - Health check endpoint for monitoring
//! - Per-device and all-device queries by calendar date or epoch range
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: Core server initialization and route registration
//! - `config`: Environment variable configuration management
//! - `time`: Date/epoch normalization and day-window arithmetic
//! - `database`: MongoDB connection bootstrap and the ping query facade
//! - `routes`: HTTP route handlers organized by functionality
//!   - `health`: Health check endpoint
//!   - `pings`: Ping recording and query endpoints
//!
//! ## Running the Server
//! ```bash
//! cargo run
//! ```
//!
//! The server starts on `http://0.0.0.0:4567` by default and expects a
//! MongoDB instance at `127.0.0.1:27017`; both are overridable through the
//! `PINGS_SERVER_*` environment variables.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Initializes the tracing/logging system and starts the HTTP server. Runs
/// until the process is terminated, or exits non-zero when the store is
/// unreachable at startup.
#[tokio::main]
async fn main() {
    // Pick up a local .env file before reading any configuration
    dotenv::dotenv().ok();

    // Initialize the tracing subscriber for structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false) // Don't show module targets for cleaner output
                .compact(), // Use compact formatting
        )
        .init();

    // Log application startup
    tracing::info!("Starting Pings Server...");
    tracing::info!(
        "Package: {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    // Start the HTTP server - this will run indefinitely
    pings_server::server::start().await;
}
