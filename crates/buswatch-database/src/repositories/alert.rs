//! Alert repository.

use sqlx::PgPool;
use uuid::Uuid;

use buswatch_core::error::{AppError, ErrorKind};
use buswatch_core::result::AppResult;
use buswatch_entity::alert::Alert;

/// Repository for persisted alerts.
#[derive(Debug, Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    /// Create a new alert repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist an alert. This is the durability boundary of the alerting
    /// pipeline; downstream publication happens only after this succeeds.
    pub async fn insert(&self, alert: &Alert) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO alerts (id, vehicle_id, timestamp, kind, value, threshold, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(alert.id)
        .bind(&alert.vehicle_id)
        .bind(alert.timestamp)
        .bind(alert.kind)
        .bind(alert.value)
        .bind(alert.threshold)
        .bind(&alert.message)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert alert", e))?;
        Ok(())
    }

    /// Most recent alerts first, bounded by `limit`.
    pub async fn find_recent(&self, limit: i64) -> AppResult<Vec<Alert>> {
        sqlx::query_as::<_, Alert>("SELECT * FROM alerts ORDER BY timestamp DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list alerts", e))
    }

    /// Find an alert by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alert>> {
        sqlx::query_as::<_, Alert>("SELECT * FROM alerts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find alert", e))
    }
}
