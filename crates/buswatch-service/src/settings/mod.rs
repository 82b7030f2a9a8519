//! Runtime settings snapshot service.

pub mod service;

pub use service::SettingsService;
