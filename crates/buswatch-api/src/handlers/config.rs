//! Runtime settings endpoints.

use axum::Json;
use axum::extract::State;

use buswatch_entity::settings::{RuntimeSettings, SettingsPatch};

use crate::dto::request::ConfigUpdateRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/config
pub async fn read_config(State(state): State<AppState>, _auth: AuthUser) -> Json<RuntimeSettings> {
    Json(state.settings_service.snapshot().as_ref().clone())
}

/// PUT /api/config
///
/// Rejected patches leave the previous settings live; accepted ones are
/// visible to the next evaluation of every consumer.
pub async fn update_config(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<ConfigUpdateRequest>,
) -> Result<Json<RuntimeSettings>, ApiError> {
    let patch = SettingsPatch {
        overspeed_threshold: req.overspeed_threshold,
        poll_interval_seconds: req.poll_interval_seconds,
        relay_enabled: req.relay_enabled,
        auto_notify_enabled: req.auto_notify_enabled,
    };
    let settings = state.settings_service.update(&patch).await?;
    Ok(Json(settings.as_ref().clone()))
}
