//! Stored telemetry models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single stored telemetry sample.
///
/// Immutable once stored; appended in arrival order. The latest-snapshot
/// view is keyed on the maximum event timestamp per vehicle, so out-of-order
/// arrivals never regress it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TelemetrySample {
    /// Row identifier (append order).
    pub id: i64,
    /// Owning vehicle.
    pub vehicle_id: String,
    /// Producer-supplied event timestamp (UTC).
    pub timestamp: DateTime<Utc>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Speed in km/h.
    pub speed_kmh: f64,
    /// Passenger count.
    pub occupancy: i32,
    /// Whether any door is open.
    pub door_open: bool,
    /// Whether the engine is running.
    pub engine_on: bool,
}

/// The most recent sample for a vehicle, joined with registry fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LatestTelemetry {
    /// Owning vehicle.
    pub vehicle_id: String,
    /// Event timestamp of the newest sample.
    pub timestamp: DateTime<Utc>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Speed in km/h.
    pub speed_kmh: f64,
    /// Passenger count.
    pub occupancy: i32,
    /// Whether any door is open.
    pub door_open: bool,
    /// Whether the engine is running.
    pub engine_on: bool,
    /// Display name from the vehicle registry.
    pub name: Option<String>,
    /// Seat capacity from the vehicle registry.
    pub capacity: Option<i32>,
}
