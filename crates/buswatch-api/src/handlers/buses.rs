//! Bus read endpoints — latest snapshot and time-range history.

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::dto::request::HistoryQuery;
use crate::dto::response::{BusResponse, TelemetryResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/buses
pub async fn list_buses(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<BusResponse>>, ApiError> {
    let rows = state.telemetry_service.latest_snapshot().await?;
    Ok(Json(rows.into_iter().map(BusResponse::from).collect()))
}

/// GET /api/buses/{id}/history?from=&to=
pub async fn bus_history(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(bus_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<TelemetryResponse>>, ApiError> {
    let samples = state
        .telemetry_service
        .history(&bus_id, query.from, query.to)
        .await?;
    Ok(Json(
        samples.into_iter().map(TelemetryResponse::from).collect(),
    ))
}
