//! Telemetry sample entities and the wire payload.

pub mod model;
pub mod reading;

pub use model::{LatestTelemetry, TelemetrySample};
pub use reading::TelemetryReading;
