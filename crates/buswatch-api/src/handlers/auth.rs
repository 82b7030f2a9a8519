//! Auth handlers — login, me, password change, and admin user management.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use buswatch_core::error::AppError;
use buswatch_entity::user::UserRole;

use crate::dto::request::{LoginRequest, PasswordChangeRequest, UserCreateRequest};
use crate::dto::response::{MessageAck, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AdminUser, AuthUser};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (token, user) = state.user_service.login(&req.username, &req.password).await?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        username: user.username,
        role: user.role.to_string(),
    }))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(auth.0))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PasswordChangeRequest>,
) -> Result<Json<MessageAck>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .user_service
        .change_password(&auth.0, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(MessageAck {
        message: "Password changed successfully".to_string(),
    }))
}

/// GET /api/auth/users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/auth/users (admin only)
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<UserCreateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let role: UserRole = req.role.parse()?;

    let user = state
        .user_service
        .create(&req.username, &req.password, role)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/auth/users/{id} (admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageAck>, ApiError> {
    state.user_service.delete(user_id, admin.id).await?;
    Ok(Json(MessageAck {
        message: "User deleted".to_string(),
    }))
}
