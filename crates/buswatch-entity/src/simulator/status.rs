//! Simulator status snapshot types.
//!
//! The core tracks only the status side table; the simulator tasks
//! themselves are external to the data path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-vehicle simulator metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSimStatus {
    /// Simulated vehicle id.
    #[serde(rename = "busId")]
    pub vehicle_id: String,
    /// Telemetry messages published since start.
    pub messages_sent: u64,
    /// Event time of the last published message.
    pub last_publish: Option<DateTime<Utc>>,
    /// Whether this vehicle stays parked near its first waypoint.
    pub stationary: bool,
}

/// Fleet-wide simulator status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorStatus {
    /// Whether any simulator task is running.
    pub running: bool,
    /// When the current run started.
    pub started_at: Option<DateTime<Utc>>,
    /// Number of running vehicle tasks.
    pub bus_count: usize,
    /// Per-vehicle metrics.
    pub buses: Vec<VehicleSimStatus>,
}
