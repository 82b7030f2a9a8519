//! MQTT broker configuration for the telemetry ingress.

use serde::{Deserialize, Serialize};

/// Connection settings for the telemetry broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    /// Broker hostname.
    #[serde(default = "default_broker_host")]
    pub host: String,
    /// Broker port.
    #[serde(default = "default_broker_port")]
    pub port: u16,
    /// Optional broker username.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional broker password.
    #[serde(default)]
    pub password: Option<String>,
    /// Client id prefix; a random suffix is appended per connection.
    #[serde(default = "default_client_id_prefix")]
    pub client_id_prefix: String,
    /// Keep-alive interval in seconds.
    #[serde(default = "default_keep_alive")]
    pub keep_alive_seconds: u64,
}

fn default_broker_host() -> String {
    "localhost".to_string()
}

fn default_broker_port() -> u16 {
    1883
}

fn default_client_id_prefix() -> String {
    "buswatch".to_string()
}

fn default_keep_alive() -> u64 {
    30
}
