//! Runtime settings repository.
//!
//! The settings live in a single guarded row; replace is one UPDATE so
//! concurrent readers never observe a partially applied patch.

use sqlx::PgPool;

use buswatch_core::error::{AppError, ErrorKind};
use buswatch_core::result::AppResult;
use buswatch_entity::settings::RuntimeSettings;

/// Repository for the runtime settings singleton row.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the singleton row, if it exists.
    pub async fn load(&self) -> AppResult<Option<RuntimeSettings>> {
        sqlx::query_as::<_, RuntimeSettings>(
            "SELECT overspeed_threshold, poll_interval_seconds, relay_enabled, auto_notify_enabled \
             FROM runtime_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load settings", e))
    }

    /// Insert or replace the singleton row atomically.
    pub async fn replace(&self, settings: &RuntimeSettings) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO runtime_settings \
             (id, overspeed_threshold, poll_interval_seconds, relay_enabled, auto_notify_enabled, updated_at) \
             VALUES (1, $1, $2, $3, $4, NOW()) \
             ON CONFLICT (id) DO UPDATE SET \
                 overspeed_threshold = EXCLUDED.overspeed_threshold, \
                 poll_interval_seconds = EXCLUDED.poll_interval_seconds, \
                 relay_enabled = EXCLUDED.relay_enabled, \
                 auto_notify_enabled = EXCLUDED.auto_notify_enabled, \
                 updated_at = NOW()",
        )
        .bind(settings.overspeed_threshold)
        .bind(settings.poll_interval_seconds)
        .bind(settings.relay_enabled)
        .bind(settings.auto_notify_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to replace settings", e))?;
        Ok(())
    }
}
