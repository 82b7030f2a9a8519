//! Simulator task registry and control.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use buswatch_core::config::mqtt::MqttConfig;
use buswatch_core::config::simulator::SimulatorConfig;
use buswatch_entity::simulator::{SimulatorStatus, VehicleSimStatus};

use crate::vehicle::{VehicleSimulator, run_vehicle};

/// Bookkeeping for one running vehicle task.
pub(crate) struct VehicleHandle {
    stationary: bool,
    messages_sent: AtomicU64,
    last_publish: Mutex<Option<DateTime<Utc>>>,
    token: CancellationToken,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl VehicleHandle {
    /// Record a successful publish.
    pub(crate) fn record_publish(&self, timestamp: DateTime<Utc>) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut guard) = self.last_publish.lock() {
            *guard = Some(timestamp);
        }
    }
}

/// Starts, stops, and reports on the simulated fleet.
///
/// The simulators are external publishers from the core's point of view;
/// this manager is only the control signal target and the status side
/// table behind `GET /simulators/status`.
pub struct SimulatorManager {
    mqtt: MqttConfig,
    config: SimulatorConfig,
    vehicles: DashMap<String, Arc<VehicleHandle>>,
    started_at: Mutex<Option<DateTime<Utc>>>,
    shutdown: CancellationToken,
}

impl SimulatorManager {
    /// Creates a manager with no vehicles running.
    pub fn new(mqtt: MqttConfig, config: SimulatorConfig) -> Self {
        Self {
            mqtt,
            config,
            vehicles: DashMap::new(),
            started_at: Mutex::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    /// Start the given vehicles, or the default fleet when none are named.
    /// Vehicles already running are left untouched.
    pub fn start(&self, vehicle_ids: Option<Vec<String>>) -> SimulatorStatus {
        let ids = vehicle_ids.unwrap_or_else(|| self.config.default_vehicle_ids());
        for vehicle_id in ids {
            self.spawn_vehicle(vehicle_id);
        }
        self.status()
    }

    /// Start a single vehicle.
    pub fn start_vehicle(&self, vehicle_id: &str) -> SimulatorStatus {
        self.spawn_vehicle(vehicle_id.to_string());
        self.status()
    }

    /// Stop a single vehicle, waiting briefly for its task to exit.
    pub async fn stop_vehicle(&self, vehicle_id: &str) -> SimulatorStatus {
        if let Some((_, handle)) = self.vehicles.remove(vehicle_id) {
            handle.token.cancel();
            Self::join_handle(&handle).await;
            info!(%vehicle_id, "Stopped vehicle simulator");
        }
        if self.vehicles.is_empty() {
            self.set_started_at(None);
        }
        self.status()
    }

    /// Stop every running vehicle.
    pub async fn stop(&self) -> SimulatorStatus {
        let ids: Vec<String> = self.vehicles.iter().map(|e| e.key().clone()).collect();
        for vehicle_id in &ids {
            if let Some((_, handle)) = self.vehicles.remove(vehicle_id) {
                handle.token.cancel();
                Self::join_handle(&handle).await;
            }
        }
        if !ids.is_empty() {
            info!(count = ids.len(), "Stopped all vehicle simulators");
        }
        self.set_started_at(None);
        self.status()
    }

    /// Cancel everything on process shutdown.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.stop().await;
    }

    /// The current status side table.
    pub fn status(&self) -> SimulatorStatus {
        let buses: Vec<VehicleSimStatus> = self
            .vehicles
            .iter()
            .map(|entry| VehicleSimStatus {
                vehicle_id: entry.key().clone(),
                messages_sent: entry.messages_sent.load(Ordering::Relaxed),
                last_publish: entry.last_publish.lock().ok().and_then(|g| *g),
                stationary: entry.stationary,
            })
            .collect();

        SimulatorStatus {
            running: !buses.is_empty(),
            started_at: self.started_at.lock().ok().and_then(|g| *g),
            bus_count: buses.len(),
            buses,
        }
    }

    fn spawn_vehicle(&self, vehicle_id: String) {
        if self.vehicles.contains_key(&vehicle_id) {
            return;
        }
        if self.vehicles.is_empty() {
            self.set_started_at(Some(Utc::now()));
        }

        let stationary = self.config.stationary_vehicles.contains(&vehicle_id);
        let token = self.shutdown.child_token();
        let handle = Arc::new(VehicleHandle {
            stationary,
            messages_sent: AtomicU64::new(0),
            last_publish: Mutex::new(None),
            token: token.clone(),
            join: Mutex::new(None),
        });

        let simulator = VehicleSimulator::new(vehicle_id.clone(), stationary);
        let join = tokio::spawn(run_vehicle(
            simulator,
            self.mqtt.clone(),
            Duration::from_secs(self.config.publish_interval_seconds),
            Arc::clone(&handle),
            token,
        ));
        if let Ok(mut guard) = handle.join.lock() {
            *guard = Some(join);
        }

        self.vehicles.insert(vehicle_id.clone(), handle);
        info!(%vehicle_id, stationary, "Started vehicle simulator");
    }

    async fn join_handle(handle: &VehicleHandle) {
        let join = handle.join.lock().ok().and_then(|mut g| g.take());
        if let Some(join) = join {
            let _ = tokio::time::timeout(Duration::from_secs(1), join).await;
        }
    }

    fn set_started_at(&self, value: Option<DateTime<Utc>>) {
        if let Ok(mut guard) = self.started_at.lock() {
            // Only the first start of a run stamps the time.
            if value.is_none() || guard.is_none() {
                *guard = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SimulatorManager {
        let mqtt = MqttConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            username: None,
            password: None,
            client_id_prefix: "test".to_string(),
            keep_alive_seconds: 30,
        };
        SimulatorManager::new(mqtt, SimulatorConfig::default())
    }

    #[tokio::test]
    async fn test_start_and_stop_tracks_status() {
        let manager = manager();
        assert!(!manager.status().running);

        let status = manager.start(Some(vec!["bus-1".to_string(), "bus-2".to_string()]));
        assert!(status.running);
        assert_eq!(status.bus_count, 2);
        assert!(status.started_at.is_some());

        let status = manager.stop().await;
        assert!(!status.running);
        assert_eq!(status.bus_count, 0);
        assert!(status.started_at.is_none());
    }

    #[tokio::test]
    async fn test_start_is_idempotent_per_vehicle() {
        let manager = manager();
        manager.start(Some(vec!["bus-1".to_string()]));
        let status = manager.start(Some(vec!["bus-1".to_string()]));
        assert_eq!(status.bus_count, 1);
        manager.stop().await;
    }

    #[tokio::test]
    async fn test_stop_single_vehicle() {
        let manager = manager();
        manager.start(Some(vec!["bus-1".to_string(), "bus-2".to_string()]));

        let status = manager.stop_vehicle("bus-1").await;
        assert_eq!(status.bus_count, 1);
        assert_eq!(status.buses[0].vehicle_id, "bus-2");

        let status = manager.stop_vehicle("bus-2").await;
        assert!(!status.running);
        assert!(status.started_at.is_none());
    }

    #[tokio::test]
    async fn test_stationary_flag_reported() {
        let manager = manager();
        let status = manager.start(Some(vec!["bus-1".to_string(), "bus-2".to_string()]));
        let bus1 = status.buses.iter().find(|b| b.vehicle_id == "bus-1").unwrap();
        let bus2 = status.buses.iter().find(|b| b.vehicle_id == "bus-2").unwrap();
        // bus-1 is in the default stationary set; bus-2 is not.
        assert!(bus1.stationary);
        assert!(!bus2.stationary);
        manager.stop().await;
    }
}
