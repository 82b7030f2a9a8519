//! # buswatch-service
//!
//! Business services for BusWatch: the telemetry ingest pipeline, the
//! edge-triggered alert engine, the notification dispatcher and driver
//! messaging, the runtime settings snapshot, and user management.

pub mod alert;
pub mod notification;
pub mod settings;
pub mod telemetry;
pub mod user;
