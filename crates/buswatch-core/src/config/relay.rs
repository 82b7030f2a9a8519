//! Third-party relay forwarder configuration.

use serde::{Deserialize, Serialize};

/// Credentials and endpoint for the external time-series relay.
///
/// Forwarding happens only when the runtime `relay_enabled` setting is on
/// AND both `channel_id` and `api_key` are present here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Relay broker hostname.
    #[serde(default = "default_relay_host")]
    pub host: String,
    /// Relay broker port.
    #[serde(default = "default_relay_port")]
    pub port: u16,
    /// Channel identifier assigned by the relay provider.
    #[serde(default)]
    pub channel_id: Option<String>,
    /// API key used as both username and password on the relay broker.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Hard timeout for a single forward attempt, in seconds.
    #[serde(default = "default_timeout")]
    pub publish_timeout_seconds: u64,
}

impl RelayConfig {
    /// Whether credentials are present for forwarding.
    pub fn has_credentials(&self) -> bool {
        self.channel_id.as_deref().is_some_and(|c| !c.is_empty())
            && self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_relay_host(),
            port: default_relay_port(),
            channel_id: None,
            api_key: None,
            publish_timeout_seconds: default_timeout(),
        }
    }
}

fn default_relay_host() -> String {
    "mqtt.thingspeak.com".to_string()
}

fn default_relay_port() -> u16 {
    1883
}

fn default_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_credentials() {
        let mut config = RelayConfig::default();
        assert!(!config.has_credentials());

        config.channel_id = Some("12345".to_string());
        assert!(!config.has_credentials());

        config.api_key = Some("key".to_string());
        assert!(config.has_credentials());

        config.channel_id = Some(String::new());
        assert!(!config.has_credentials());
    }
}
