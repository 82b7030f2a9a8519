//! Best-effort mirroring of telemetry to a third-party endpoint.
//!
//! Each forward runs in a detached task over a short-lived connection with
//! a hard timeout, so a slow or dead relay endpoint can never stall the
//! ingest path. Failures are logged and discarded; nothing is retried.

use std::time::Duration;

use rand::RngExt;
use rumqttc::{AsyncClient, Event, MqttOptions, Outgoing, QoS};
use tracing::{debug, warn};

use buswatch_core::config::relay::RelayConfig;
use buswatch_core::{AppError, AppResult};
use buswatch_entity::settings::RuntimeSettings;
use buswatch_entity::telemetry::TelemetryReading;

/// Forwards reduced telemetry payloads when enabled and configured.
#[derive(Debug, Clone)]
pub struct RelayForwarder {
    config: RelayConfig,
}

impl RelayForwarder {
    /// Creates a forwarder from static relay configuration.
    pub fn new(config: RelayConfig) -> Self {
        Self { config }
    }

    /// Dispatch one sample without blocking the caller.
    ///
    /// A silent no-op when disabled in the runtime settings or when
    /// credentials are absent. Returns whether a forward was spawned.
    pub fn dispatch(&self, reading: &TelemetryReading, settings: &RuntimeSettings) -> bool {
        if !settings.relay_enabled || !self.config.has_credentials() {
            return false;
        }

        let payload = serde_json::json!({
            "busId": reading.vehicle_id,
            "timestamp": reading.timestamp,
            "speed_kmh": reading.speed_kmh,
        });
        let config = self.config.clone();
        let vehicle_id = reading.vehicle_id.clone();

        tokio::spawn(async move {
            match forward_once(&config, &payload).await {
                Ok(()) => debug!(%vehicle_id, "Forwarded telemetry to relay"),
                Err(e) => warn!(%vehicle_id, error = %e, "Relay forward failed"),
            }
        });
        true
    }
}

/// Connect, publish one reduced payload, and disconnect, all within the
/// configured timeout.
async fn forward_once(config: &RelayConfig, payload: &serde_json::Value) -> AppResult<()> {
    let channel_id = config
        .channel_id
        .as_deref()
        .ok_or_else(|| AppError::configuration("Relay channel id missing"))?;
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::configuration("Relay API key missing"))?;

    let client_id = format!("relay-{}", rand::rng().random_range(1000..10000));
    let mut options = MqttOptions::new(client_id, &config.host, config.port);
    options.set_credentials(api_key, api_key);
    options.set_keep_alive(Duration::from_secs(30));

    let (client, mut eventloop) = AsyncClient::new(options, 10);
    let topic = format!("channels/{channel_id}/publish");
    let body = serde_json::to_vec(payload)?;

    let publish_and_flush = async {
        client
            .publish(topic, QoS::AtMostOnce, false, body)
            .await
            .map_err(|e| AppError::upstream(format!("Relay publish failed: {e}")))?;

        // Drive the connection until the publish leaves the socket.
        loop {
            match eventloop.poll().await {
                Ok(Event::Outgoing(Outgoing::Publish(_))) => break,
                Ok(_) => continue,
                Err(e) => {
                    return Err(AppError::upstream(format!("Relay connection error: {e}")));
                }
            }
        }
        let _ = client.disconnect().await;
        Ok(())
    };

    tokio::time::timeout(
        Duration::from_secs(config.publish_timeout_seconds),
        publish_and_flush,
    )
    .await
    .map_err(|_| AppError::upstream("Relay publish timed out"))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading() -> TelemetryReading {
        TelemetryReading {
            vehicle_id: "bus-7".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            lat: 25.2,
            lon: 55.3,
            speed_kmh: 42.0,
            occupancy: 3,
            door_open: false,
            engine_on: true,
        }
    }

    fn settings(relay_enabled: bool) -> RuntimeSettings {
        RuntimeSettings {
            overspeed_threshold: 70.0,
            poll_interval_seconds: 5,
            relay_enabled,
            auto_notify_enabled: false,
        }
    }

    #[tokio::test]
    async fn test_disabled_is_silent_noop() {
        let forwarder = RelayForwarder::new(RelayConfig {
            channel_id: Some("123".to_string()),
            api_key: Some("key".to_string()),
            ..RelayConfig::default()
        });
        assert!(!forwarder.dispatch(&reading(), &settings(false)));
    }

    #[tokio::test]
    async fn test_missing_credentials_is_silent_noop() {
        let forwarder = RelayForwarder::new(RelayConfig::default());
        assert!(!forwarder.dispatch(&reading(), &settings(true)));
    }

    #[tokio::test]
    async fn test_enabled_with_credentials_spawns() {
        let forwarder = RelayForwarder::new(RelayConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            channel_id: Some("123".to_string()),
            api_key: Some("key".to_string()),
            publish_timeout_seconds: 1,
        });
        // The spawned forward fails against the unreachable endpoint; the
        // dispatch itself neither blocks nor errors.
        assert!(forwarder.dispatch(&reading(), &settings(true)));
    }
}
