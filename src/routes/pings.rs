//! Ping recording and query endpoints.
//!
//! Date parameters accept either a `YYYY-MM-DD` calendar date or decimal
//! Unix epoch seconds. Query windows include their start and exclude their
//! end, so a ping landing exactly on a window's `to` bound is not returned.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::info;

use crate::database::models::{Ping, group_by_device};
use crate::error::ApiError;
use crate::server::AppState;
use crate::time::{self, TimeWindow};

/// List every device id that has ever reported a ping, unordered.
pub async fn list_devices(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.list_device_ids().await?))
}

/// All devices' pings for one calendar date, grouped by device.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/all/{date}`
/// - **Response**: JSON object mapping device id to timestamp array
pub async fn all_for_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<HashMap<String, Vec<i64>>>, ApiError> {
    let window = time::day_range(time::normalize(&date)?);
    let pings = state.store.find_by_window(window).await?;
    Ok(Json(group_by_device(pings)))
}

/// One device's pings for one calendar date, as a bare timestamp array.
pub async fn device_for_date(
    State(state): State<AppState>,
    Path((device_id, date)): Path<(String, String)>,
) -> Result<Json<Vec<i64>>, ApiError> {
    let window = time::day_range(time::normalize(&date)?);
    let pings = state
        .store
        .find_by_device_and_window(&device_id, window)
        .await?;
    Ok(Json(pings.into_iter().map(|p| p.timestamp).collect()))
}

/// All devices' pings between two date/epoch bounds, grouped by device.
pub async fn all_for_window(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<HashMap<String, Vec<i64>>>, ApiError> {
    let window = TimeWindow {
        from: time::normalize(&from)?.timestamp(),
        to: time::normalize(&to)?.timestamp(),
    };
    let pings = state.store.find_by_window(window).await?;
    Ok(Json(group_by_device(pings)))
}

/// One device's pings between two date/epoch bounds.
pub async fn device_for_window(
    State(state): State<AppState>,
    Path((device_id, from, to)): Path<(String, String, String)>,
) -> Result<Json<Vec<i64>>, ApiError> {
    let window = TimeWindow {
        from: time::normalize(&from)?.timestamp(),
        to: time::normalize(&to)?.timestamp(),
    };
    let pings = state
        .store
        .find_by_device_and_window(&device_id, window)
        .await?;
    Ok(Json(pings.into_iter().map(|p| p.timestamp).collect()))
}

/// Delete every stored ping. Answers 200 even when the collection was
/// already empty.
pub async fn clear_data(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.store.clear_all().await?;
    info!("cleared all ping data");
    Ok(StatusCode::OK)
}

/// Record one ping.
///
/// # Route
/// - **Method**: POST
/// - **Path**: `/{device_id}/{epoch_time}`
/// - **Response**: 200, no body
///
/// Unlike the query routes, a non-numeric `epoch_time` is not rejected here:
/// it coerces to 0, keeping the write path lenient.
pub async fn record_ping(
    State(state): State<AppState>,
    Path((device_id, epoch_time)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let ping = Ping {
        device_id,
        timestamp: time::epoch_or_zero(&epoch_time),
    };
    state.store.insert(ping).await?;
    Ok(StatusCode::OK)
}
