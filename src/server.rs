//! # Server Module
//!
//! HTTP server setup and route configuration for the Pings Server.

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::database::PingStore;
use crate::routes::{health, pings};

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: PingStore,
}

/// Build the full route table.
///
/// Static segments win over dynamic ones, so `/ping`, `/devices`,
/// `/clear_data` and the `/all/...` routes shadow the `{device_id}` routes.
/// A device literally named `all` therefore cannot be addressed through the
/// per-device routes, matching the historical behavior.
pub fn router(state: AppState) -> Router {
    // The matcher allows only one parameter name per position, so the
    // single-date routes reuse `from` for their date segment (a date is the
    // start of its own day window). Handlers extract positionally.
    Router::new()
        .route("/ping", get(health::ping)) // Health check endpoint
        .route("/devices", get(pings::list_devices))
        .route("/clear_data", post(pings::clear_data))
        .route("/all/{from}", get(pings::all_for_date))
        .route("/all/{from}/{to}", get(pings::all_for_window))
        // GET reads one device's pings for a date; POST records a ping with
        // an epoch timestamp. Same shape, so they share one route entry.
        .route(
            "/{device_id}/{from}",
            get(pings::device_for_date).post(pings::record_ping),
        )
        .route("/{device_id}/{from}/{to}", get(pings::device_for_window))
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([axum::http::Method::GET, axum::http::Method::POST]),
            ),
        )
        .with_state(state)
}

/// Starts the Pings HTTP server.
///
/// Loads configuration, connects to MongoDB, then binds the listener and
/// serves until the process is terminated. An unreachable store at startup
/// is fatal: the process logs a diagnostic and exits non-zero rather than
/// serving requests it cannot answer.
pub async fn start() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e:#}");
            std::process::exit(1);
        }
    };

    let store = match PingStore::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("could not connect to MongoDB: {e:#}");
            tracing::error!(
                "please check an instance is running, with the correct port. \
                 See README.md for further information"
            );
            std::process::exit(1);
        }
    };
    tracing::info!("connected to MongoDB server at {}", config.database.uri);

    let app = router(AppState { store });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect(
        "Failed to bind to address - port may already be in use"
    );

    // Log server startup information
    tracing::info!("listening on http://{addr}");
    tracing::info!("health check available at http://{addr}/ping");

    // Start serving the application
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
