//! Request-level error type shared by all route handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::time::TimeParseError;

/// Errors a handler can surface to the client.
///
/// Malformed path parameters map to 400; store failures map to 500 and
/// propagate without retries.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Format(#[from] TimeParseError),

    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Format(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
