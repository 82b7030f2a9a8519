//! The telemetry subscriber loop.
//!
//! One long-lived broker connection fans in every vehicle topic. Each
//! message is parsed, validated, and handed synchronously to the ingest
//! pipeline before the next event is polled; the relay forward is then
//! dispatched without awaiting it. No per-message error unwinds the loop.

use std::sync::Arc;
use std::time::Duration;

use rand::RngExt;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use buswatch_core::config::mqtt::MqttConfig;
use buswatch_service::settings::SettingsService;
use buswatch_service::telemetry::TelemetryService;

use crate::decode::decode_reading;
use crate::relay::RelayForwarder;
use crate::topic::{TELEMETRY_TOPIC_FILTER, parse_telemetry_topic};

/// Delay before polling again after a connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Owns the broker connection consuming vehicle telemetry.
pub struct TelemetryIngestor {
    service: Arc<TelemetryService>,
    settings: Arc<SettingsService>,
    relay: Arc<RelayForwarder>,
}

impl TelemetryIngestor {
    /// Creates a new ingestor over the given services.
    pub fn new(
        service: Arc<TelemetryService>,
        settings: Arc<SettingsService>,
        relay: Arc<RelayForwarder>,
    ) -> Self {
        Self {
            service,
            settings,
            relay,
        }
    }

    /// Build the shared broker connection from configuration.
    ///
    /// The returned client is also used by the alert publisher; the event
    /// loop must be driven by [`TelemetryIngestor::run`].
    pub fn connect(config: &MqttConfig) -> (AsyncClient, EventLoop) {
        let client_id = format!(
            "{}-subscriber-{}",
            config.client_id_prefix,
            rand::rng().random_range(1000..10000)
        );
        let mut options = MqttOptions::new(client_id, &config.host, config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_seconds));
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            options.set_credentials(username, password);
        }

        info!(
            host = %config.host,
            port = config.port,
            "Connecting to MQTT broker"
        );
        AsyncClient::new(options, 100)
    }

    /// Run the consumption loop until cancelled.
    ///
    /// Connection errors are logged and retried by continuing to poll; the
    /// subscription is re-established on every CONNACK.
    pub async fn run(
        &self,
        client: AsyncClient,
        mut eventloop: EventLoop,
        token: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("Telemetry ingestor shutting down");
                    let _ = client.disconnect().await;
                    break;
                }
                event = eventloop.poll() => {
                    match event {
                        Ok(Event::Incoming(Packet::ConnAck(_))) => {
                            info!(topic = TELEMETRY_TOPIC_FILTER, "Connected, subscribing to telemetry");
                            if let Err(e) = client
                                .subscribe(TELEMETRY_TOPIC_FILTER, QoS::AtLeastOnce)
                                .await
                            {
                                error!(error = %e, "Failed to subscribe to telemetry topic");
                            }
                        }
                        Ok(Event::Incoming(Packet::Publish(publish))) => {
                            self.handle_publish(&publish.topic, &publish.payload).await;
                        }
                        Ok(Event::Incoming(Packet::SubAck(_))) => {
                            debug!("Telemetry subscription acknowledged");
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!(error = %e, "MQTT connection error, retrying");
                            tokio::select! {
                                _ = token.cancelled() => break,
                                _ = tokio::time::sleep(RECONNECT_DELAY) => {}
                            }
                        }
                    }
                }
            }
        }

        info!("Telemetry ingestor stopped");
    }

    /// Handle one inbound publish packet. Invalid messages are dropped
    /// with a recorded reason; pipeline errors are contained here.
    async fn handle_publish(&self, topic: &str, payload: &[u8]) {
        let vehicle_id = match parse_telemetry_topic(topic) {
            Ok(vehicle_id) => vehicle_id,
            Err(e) => {
                warn!(topic, error = %e, "Dropping message on unrecognized topic");
                return;
            }
        };

        let reading = match decode_reading(vehicle_id, payload) {
            Ok(reading) => reading,
            Err(e) => {
                warn!(topic, error = %e, "Dropping invalid telemetry payload");
                return;
            }
        };

        // Persist and evaluate before consuming the next message.
        if let Err(e) = self.service.ingest(&reading).await {
            error!(
                vehicle_id = %reading.vehicle_id,
                error = %e,
                "Failed to ingest telemetry sample"
            );
            return;
        }

        // Fire-and-forget; relay latency and failures stay off this path.
        self.relay.dispatch(&reading, &self.settings.snapshot());
    }
}
