//! One simulated vehicle: movement model and publish loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::RngExt;
use rumqttc::{AsyncClient, MqttOptions, QoS};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use buswatch_core::config::mqtt::MqttConfig;
use buswatch_entity::telemetry::TelemetryReading;
use buswatch_ingest::topic::telemetry_topic;

use crate::manager::VehicleHandle;
use crate::routes::route_for;

/// Movement state for one simulated vehicle.
pub(crate) struct VehicleSimulator {
    vehicle_id: String,
    stationary: bool,
    route: &'static [(f64, f64)],
    segment_index: usize,
    progress: f64,
    door_open: bool,
    door_toggle_in: Duration,
}

impl VehicleSimulator {
    pub(crate) fn new(vehicle_id: String, stationary: bool) -> Self {
        let route = route_for(&vehicle_id);
        Self {
            vehicle_id,
            stationary,
            route,
            segment_index: 0,
            progress: 0.0,
            door_open: false,
            door_toggle_in: Duration::from_secs(rand::rng().random_range(20..60)),
        }
    }

    /// Advance along the route and produce the next reading.
    fn next_reading(&mut self, elapsed: Duration) -> TelemetryReading {
        let mut rng = rand::rng();

        let (lat, lon) = if self.stationary {
            // Parked vehicles wobble around their first waypoint.
            let (lat, lon) = self.route[0];
            (
                lat + rng.random_range(-0.0001..0.0001),
                lon + rng.random_range(-0.0001..0.0001),
            )
        } else {
            self.progress += rng.random_range(0.08..0.25);
            while self.progress >= 1.0 {
                self.progress -= 1.0;
                self.segment_index = (self.segment_index + 1) % self.route.len();
            }
            let (start_lat, start_lon) = self.route[self.segment_index];
            let (end_lat, end_lon) = self.route[(self.segment_index + 1) % self.route.len()];
            (
                start_lat + (end_lat - start_lat) * self.progress + rng.random_range(-0.0005..0.0005),
                start_lon + (end_lon - start_lon) * self.progress + rng.random_range(-0.0005..0.0005),
            )
        };

        let speed_kmh = if self.stationary {
            rng.random_range(0.0..5.0)
        } else {
            // Cruise around 50 km/h with occasional bursts that cross the
            // overspeed threshold.
            let mut speed: f64 = 50.0 + rng.random_range(-12.0..12.0);
            if rng.random_bool(0.15) {
                speed += rng.random_range(15.0..35.0);
            }
            speed.max(0.0)
        };

        self.door_toggle_in = self.door_toggle_in.saturating_sub(elapsed);
        if self.door_toggle_in.is_zero() {
            self.door_open = !self.door_open;
            self.door_toggle_in = Duration::from_secs(rng.random_range(20..60));
        }

        TelemetryReading {
            vehicle_id: self.vehicle_id.clone(),
            timestamp: Utc::now(),
            lat: (lat * 1e6).round() / 1e6,
            lon: (lon * 1e6).round() / 1e6,
            speed_kmh: (speed_kmh * 10.0).round() / 10.0,
            occupancy: rng.random_range(0..=30),
            door_open: self.door_open,
            engine_on: true,
        }
    }
}

/// Run the publish loop for one vehicle until cancelled.
pub(crate) async fn run_vehicle(
    mut simulator: VehicleSimulator,
    mqtt: MqttConfig,
    publish_interval: Duration,
    handle: Arc<VehicleHandle>,
    token: CancellationToken,
) {
    let vehicle_id = simulator.vehicle_id.clone();
    let client_id = format!("sim-{}-{}", vehicle_id, rand::rng().random_range(1000..10000));
    let mut options = MqttOptions::new(client_id, &mqtt.host, mqtt.port);
    options.set_keep_alive(Duration::from_secs(mqtt.keep_alive_seconds));
    if let (Some(username), Some(password)) = (&mqtt.username, &mqtt.password) {
        options.set_credentials(username, password);
    }

    let (client, mut eventloop) = AsyncClient::new(options, 10);
    let topic = telemetry_topic(&vehicle_id);
    info!(%vehicle_id, %topic, "Vehicle simulator started");

    let mut next_publish = tokio::time::Instant::now();
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                let _ = client.disconnect().await;
                break;
            }
            _ = tokio::time::sleep_until(next_publish) => {
                // Jitter each cycle so the fleet does not publish in lockstep.
                let jitter_ms = rand::rng().random_range(0..1000);
                let elapsed = publish_interval + Duration::from_millis(jitter_ms);
                next_publish = tokio::time::Instant::now() + elapsed;

                let reading = simulator.next_reading(elapsed);
                match serde_json::to_vec(&reading) {
                    Ok(payload) => {
                        // try_publish keeps this branch from blocking on a
                        // full request queue while the broker is down.
                        if let Err(e) = client.try_publish(&topic, QoS::AtLeastOnce, false, payload)
                        {
                            warn!(%vehicle_id, error = %e, "Failed to publish telemetry");
                        } else {
                            handle.record_publish(reading.timestamp);
                        }
                    }
                    Err(e) => warn!(%vehicle_id, error = %e, "Failed to encode telemetry"),
                }
            }
            event = eventloop.poll() => {
                if let Err(e) = event {
                    debug!(%vehicle_id, error = %e, "Simulator connection error, retrying");
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = tokio::time::sleep(Duration::from_secs(2)) => {}
                    }
                }
            }
        }
    }

    info!(%vehicle_id, "Vehicle simulator stopped");
}
