//! Alert read endpoint.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use buswatch_core::error::AppError;

use crate::dto::request::AlertsQuery;
use crate::dto::response::AlertResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/alerts?limit=
pub async fn recent_alerts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<Vec<AlertResponse>>, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let alerts = state.alert_service.recent(query.limit).await?;
    Ok(Json(alerts.into_iter().map(AlertResponse::from).collect()))
}
