//! Runtime settings singleton.

pub mod model;

pub use model::{RuntimeSettings, SettingsPatch};
