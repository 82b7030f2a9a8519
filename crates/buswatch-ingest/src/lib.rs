//! # buswatch-ingest
//!
//! MQTT plumbing for BusWatch: the telemetry subscriber loop, payload
//! decoding and validation, the outbound alert publisher, and the
//! best-effort relay forwarder.

pub mod decode;
pub mod publisher;
pub mod relay;
pub mod subscriber;
pub mod topic;

pub use publisher::MqttAlertPublisher;
pub use relay::RelayForwarder;
pub use subscriber::TelemetryIngestor;
