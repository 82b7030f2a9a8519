//! Repository implementations, one per aggregate.

pub mod alert;
pub mod message;
pub mod settings;
pub mod telemetry;
pub mod user;
pub mod vehicle;
