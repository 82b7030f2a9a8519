//! Simulator control endpoints.
//!
//! Control signals to the simulator processes; the data path is untouched.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};

use buswatch_core::error::AppError;
use buswatch_entity::simulator::SimulatorStatus;

use crate::dto::request::SimulatorStartRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/simulators/status
pub async fn status(State(state): State<AppState>, _auth: AuthUser) -> Json<SimulatorStatus> {
    Json(state.simulator.status())
}

/// POST /api/simulators/start
///
/// The body is optional; an empty body starts the default fleet.
pub async fn start(
    State(state): State<AppState>,
    _auth: AuthUser,
    body: Bytes,
) -> Result<Json<SimulatorStatus>, ApiError> {
    let bus_ids = if body.is_empty() {
        None
    } else {
        let req: SimulatorStartRequest = serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
        req.bus_ids
    };
    Ok(Json(state.simulator.start(bus_ids)))
}

/// POST /api/simulators/stop
pub async fn stop(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<SimulatorStatus>, ApiError> {
    Ok(Json(state.simulator.stop().await))
}

/// POST /api/simulators/bus/{id}/start
pub async fn start_bus(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(bus_id): Path<String>,
) -> Result<Json<SimulatorStatus>, ApiError> {
    Ok(Json(state.simulator.start_vehicle(&bus_id)))
}

/// POST /api/simulators/bus/{id}/stop
pub async fn stop_bus(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(bus_id): Path<String>,
) -> Result<Json<SimulatorStatus>, ApiError> {
    Ok(Json(state.simulator.stop_vehicle(&bus_id).await))
}
