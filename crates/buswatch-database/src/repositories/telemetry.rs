//! Telemetry append and query repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use buswatch_core::error::{AppError, ErrorKind};
use buswatch_core::result::AppResult;
use buswatch_entity::telemetry::{LatestTelemetry, TelemetryReading, TelemetrySample};

/// Repository for telemetry samples.
///
/// Appends never reject a structurally valid sample; duplicate rows under
/// at-least-once redelivery are tolerated.
#[derive(Debug, Clone)]
pub struct TelemetryRepository {
    pool: PgPool,
}

impl TelemetryRepository {
    /// Create a new telemetry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a validated reading and return the stored sample.
    pub async fn insert(&self, reading: &TelemetryReading) -> AppResult<TelemetrySample> {
        sqlx::query_as::<_, TelemetrySample>(
            "INSERT INTO telemetry (vehicle_id, timestamp, lat, lon, speed_kmh, occupancy, door_open, engine_on) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&reading.vehicle_id)
        .bind(reading.timestamp)
        .bind(reading.lat)
        .bind(reading.lon)
        .bind(reading.speed_kmh)
        .bind(reading.occupancy)
        .bind(reading.door_open)
        .bind(reading.engine_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert telemetry", e))
    }

    /// One row per known vehicle: the sample with the maximum event
    /// timestamp, joined with registry fields.
    pub async fn latest_snapshot(&self) -> AppResult<Vec<LatestTelemetry>> {
        sqlx::query_as::<_, LatestTelemetry>(
            "SELECT DISTINCT ON (t.vehicle_id) \
                    t.vehicle_id, t.timestamp, t.lat, t.lon, t.speed_kmh, \
                    t.occupancy, t.door_open, t.engine_on, v.name, v.capacity \
             FROM telemetry t \
             LEFT JOIN vehicles v ON v.vehicle_id = t.vehicle_id \
             ORDER BY t.vehicle_id, t.timestamp DESC, t.id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query latest snapshot", e)
        })
    }

    /// Samples for a vehicle within `[from, to]`, ascending by timestamp.
    ///
    /// The caller-supplied range bounds the scan; `to = None` means "up to
    /// now".
    pub async fn history(
        &self,
        vehicle_id: &str,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<TelemetrySample>> {
        sqlx::query_as::<_, TelemetrySample>(
            "SELECT * FROM telemetry \
             WHERE vehicle_id = $1 AND timestamp >= $2 AND ($3::timestamptz IS NULL OR timestamp <= $3) \
             ORDER BY timestamp ASC, id ASC",
        )
        .bind(vehicle_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query history", e))
    }
}
