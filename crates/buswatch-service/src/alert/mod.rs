//! Alert evaluation and queries.

pub mod engine;
pub mod service;

pub use engine::{AlertEngine, DOOR_SPEED_FLOOR_KMH};
pub use service::AlertService;
