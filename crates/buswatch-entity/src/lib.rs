//! # buswatch-entity
//!
//! Entity models for BusWatch: vehicles, telemetry samples, alerts, driver
//! messages, runtime settings, users, and simulator status types.

pub mod alert;
pub mod message;
pub mod settings;
pub mod simulator;
pub mod telemetry;
pub mod user;
pub mod vehicle;
