//! Vehicle registry repository.

use sqlx::PgPool;

use buswatch_core::error::{AppError, ErrorKind};
use buswatch_core::result::AppResult;
use buswatch_entity::vehicle::Vehicle;

/// Repository for the vehicle registry.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    /// Create a new vehicle repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a vehicle on first sighting.
    ///
    /// Existing rows are left untouched so display metadata survives
    /// repeated sightings.
    pub async fn upsert_sighting(&self, vehicle_id: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO vehicles (vehicle_id) VALUES ($1) ON CONFLICT (vehicle_id) DO NOTHING")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to upsert vehicle", e)
            })?;
        Ok(())
    }

    /// Find a vehicle by its external id.
    pub async fn find_by_id(&self, vehicle_id: &str) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find vehicle", e))
    }

    /// Check whether a vehicle is registered.
    pub async fn exists(&self, vehicle_id: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check vehicle", e)
            })?;
        Ok(count > 0)
    }
}
