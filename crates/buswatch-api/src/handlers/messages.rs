//! Driver messaging endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use buswatch_core::error::AppError;
use buswatch_entity::message::MessageTemplateKind;
use buswatch_service::notification::SendMessage;
use buswatch_service::notification::templates::TemplateInfo;

use crate::dto::request::{MessageSendRequest, MessagesQuery};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/messages/send
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<MessageSendRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let template_kind: MessageTemplateKind = req.template_type.parse()?;

    let message = state
        .message_service
        .send(
            SendMessage {
                vehicle_id: req.bus_id,
                alert_id: req.alert_id,
                template_kind,
                custom_note: req.custom_note,
                speed: req.speed,
                threshold: req.threshold,
            },
            Some(auth.id),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// GET /api/messages?bus_id=&limit=&offset=
pub async fn list_messages(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let messages = state
        .message_service
        .list(query.bus_id.as_deref(), query.limit, query.offset)
        .await?;
    Ok(Json(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

/// GET /api/messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(message_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = state.message_service.get(message_id).await?;
    Ok(Json(MessageResponse::from(message)))
}

/// GET /api/messages/templates
pub async fn get_templates(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Json<Vec<TemplateInfo>> {
    Json(state.message_service.templates())
}
