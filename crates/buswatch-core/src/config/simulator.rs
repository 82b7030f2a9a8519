//! Simulator fleet configuration.

use serde::{Deserialize, Serialize};

/// Settings for the server-managed vehicle simulators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Number of vehicles in the default fleet (`bus-1` .. `bus-N`).
    #[serde(default = "default_fleet_size")]
    pub fleet_size: u32,
    /// Vehicle ids that stay parked near their first waypoint.
    #[serde(default = "default_stationary")]
    pub stationary_vehicles: Vec<String>,
    /// Base publish interval in seconds (jitter is added per message).
    #[serde(default = "default_publish_interval")]
    pub publish_interval_seconds: u64,
}

impl SimulatorConfig {
    /// The default fleet vehicle ids.
    pub fn default_vehicle_ids(&self) -> Vec<String> {
        (1..=self.fleet_size).map(|i| format!("bus-{i}")).collect()
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            fleet_size: default_fleet_size(),
            stationary_vehicles: default_stationary(),
            publish_interval_seconds: default_publish_interval(),
        }
    }
}

fn default_fleet_size() -> u32 {
    13
}

fn default_stationary() -> Vec<String> {
    ["bus-1", "bus-5", "bus-9", "bus-13"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_publish_interval() -> u64 {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vehicle_ids() {
        let config = SimulatorConfig {
            fleet_size: 3,
            ..SimulatorConfig::default()
        };
        assert_eq!(config.default_vehicle_ids(), vec!["bus-1", "bus-2", "bus-3"]);
    }
}
