//! # buswatch-simulator
//!
//! Server-managed vehicle simulators. Each running vehicle is a tokio task
//! publishing JSON telemetry on its own topic; the manager tracks tasks and
//! exposes the status side table consumed by the control surface.

pub mod manager;
mod routes;
mod vehicle;

pub use manager::SimulatorManager;
