//! Vehicle registry model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A vehicle known to the system.
///
/// Vehicles are created on first telemetry sighting (upsert-on-sight) and
/// never deleted by the core; only display metadata is mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    /// Stable external identifier (e.g. "bus-7").
    pub vehicle_id: String,
    /// Human-readable display name.
    pub name: Option<String>,
    /// Seat capacity. Occupancy is bounded by this by convention only.
    pub capacity: Option<i32>,
}
