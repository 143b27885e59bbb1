use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/ping`
/// - **Response**: JSON object with status field
///
/// # Examples
/// ```bash
/// curl http://localhost:4567/ping
/// # Response: {"status":"pong"}
/// ```
///
/// Used by load balancers, uptime monitors and container orchestrators to
/// verify the service is up. Never touches the database, so it stays green
/// even when MongoDB is struggling mid-flight.
pub async fn ping() -> Json<serde_json::Value> {
    // Return a simple JSON response indicating the server is alive
    Json(json!({ "status": "pong" }))
}
