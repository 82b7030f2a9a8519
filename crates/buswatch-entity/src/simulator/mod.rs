//! Simulator status types.

pub mod status;

pub use status::{SimulatorStatus, VehicleSimStatus};
