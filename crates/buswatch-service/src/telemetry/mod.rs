//! Telemetry ingest pipeline and read queries.

pub mod service;

pub use service::TelemetryService;
