//! Alert models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::AlertKind;

/// A persisted safety alert.
///
/// Immutable once created. `threshold` is the value in effect at evaluation
/// time, not at query time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    /// Unique alert identifier.
    pub id: Uuid,
    /// Owning vehicle.
    pub vehicle_id: String,
    /// Event timestamp of the sample that triggered the alert.
    pub timestamp: DateTime<Utc>,
    /// Violation kind.
    pub kind: AlertKind,
    /// Measured value (speed in km/h for both kinds).
    pub value: f64,
    /// Threshold in effect when the alert fired.
    pub threshold: f64,
    /// Human-readable summary.
    pub message: String,
}

/// An alert produced by the engine, before persistence assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    /// Owning vehicle.
    pub vehicle_id: String,
    /// Event timestamp of the triggering sample.
    pub timestamp: DateTime<Utc>,
    /// Violation kind.
    pub kind: AlertKind,
    /// Measured value.
    pub value: f64,
    /// Threshold in effect at evaluation time.
    pub threshold: f64,
    /// Human-readable summary.
    pub message: String,
}

impl AlertEvent {
    /// Materialize the event into a persistable alert with a fresh id.
    pub fn into_alert(self) -> Alert {
        Alert {
            id: Uuid::new_v4(),
            vehicle_id: self.vehicle_id,
            timestamp: self.timestamp,
            kind: self.kind,
            value: self.value,
            threshold: self.threshold,
            message: self.message,
        }
    }
}
