//! Driver message repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use buswatch_core::error::{AppError, ErrorKind};
use buswatch_core::result::AppResult;
use buswatch_entity::message::{DriverMessage, MessageStatus};

/// Repository for driver messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new message.
    pub async fn insert(&self, message: &DriverMessage) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO driver_messages \
             (id, vehicle_id, alert_id, template_kind, body, custom_note, sent_by, sent_at, \
              status, delivered_at, read_at, error_message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(message.id)
        .bind(&message.vehicle_id)
        .bind(message.alert_id)
        .bind(message.template_kind)
        .bind(&message.body)
        .bind(&message.custom_note)
        .bind(message.sent_by)
        .bind(message.sent_at)
        .bind(message.status)
        .bind(message.delivered_at)
        .bind(message.read_at)
        .bind(&message.error_message)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert message", e))?;
        Ok(())
    }

    /// List messages, newest first, optionally filtered by vehicle.
    pub async fn find(
        &self,
        vehicle_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<DriverMessage>> {
        sqlx::query_as::<_, DriverMessage>(
            "SELECT * FROM driver_messages \
             WHERE ($1::text IS NULL OR vehicle_id = $1) \
             ORDER BY sent_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(vehicle_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }

    /// Find a message by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DriverMessage>> {
        sqlx::query_as::<_, DriverMessage>("SELECT * FROM driver_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find message", e))
    }

    /// Advance a message's delivery status.
    ///
    /// Enforces the monotonic lifecycle: the row is updated only if it is
    /// still in the observed prior status and the transition is legal.
    pub async fn update_status(
        &self,
        id: Uuid,
        next: MessageStatus,
        delivered_at: Option<DateTime<Utc>>,
        read_at: Option<DateTime<Utc>>,
        error_message: Option<&str>,
    ) -> AppResult<DriverMessage> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Message {id} not found")))?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::conflict(format!(
                "Illegal message status transition {} -> {}",
                current.status, next
            )));
        }

        sqlx::query_as::<_, DriverMessage>(
            "UPDATE driver_messages \
             SET status = $3, \
                 delivered_at = COALESCE($4, delivered_at), \
                 read_at = COALESCE($5, read_at), \
                 error_message = COALESCE($6, error_message) \
             WHERE id = $1 AND status = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(current.status)
        .bind(next)
        .bind(delivered_at)
        .bind(read_at)
        .bind(error_message)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update message status", e)
        })?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Message {id} changed status concurrently; update not applied"
            ))
        })
    }
}
