//! Seed values for the runtime settings singleton.

use serde::{Deserialize, Serialize};

/// Defaults used to initialize the runtime settings row when it does not
/// exist yet. After first startup the database row is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsDefaults {
    /// Overspeed alert threshold in km/h.
    #[serde(default = "default_overspeed_threshold")]
    pub overspeed_threshold: f64,
    /// Suggested polling interval for read-side consumers, in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: i32,
    /// Whether the relay forwarder starts enabled.
    #[serde(default)]
    pub relay_enabled: bool,
    /// Whether automatic driver notifications start enabled.
    #[serde(default)]
    pub auto_notify_enabled: bool,
}

impl Default for SettingsDefaults {
    fn default() -> Self {
        Self {
            overspeed_threshold: default_overspeed_threshold(),
            poll_interval_seconds: default_poll_interval(),
            relay_enabled: false,
            auto_notify_enabled: false,
        }
    }
}

fn default_overspeed_threshold() -> f64 {
    70.0
}

fn default_poll_interval() -> i32 {
    5
}
