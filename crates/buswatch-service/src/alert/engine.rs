//! Edge-triggered per-vehicle alert evaluation.
//!
//! Each vehicle carries two independent violating-state flags. An alert is
//! emitted only on the NORMAL → VIOLATING transition of a flag; a vehicle
//! that stays in violation across consecutive samples produces exactly one
//! alert for that episode. VIOLATING → NORMAL clears the flag silently.
//!
//! State is in-memory only: after a restart every vehicle defaults back to
//! NORMAL, so a vehicle still violating raises a fresh alert (at-least-once
//! rather than missing a real violation).

use dashmap::DashMap;

use buswatch_entity::alert::{AlertEvent, AlertKind};
use buswatch_entity::settings::RuntimeSettings;
use buswatch_entity::telemetry::TelemetryReading;

/// Speed above which an open door counts as "moving". Fixed by contract,
/// unlike the configurable overspeed threshold.
pub const DOOR_SPEED_FLOOR_KMH: f64 = 5.0;

#[derive(Debug, Default, Clone, Copy)]
struct VehicleAlertState {
    overspeeding: bool,
    door_open_while_moving: bool,
}

/// Stateful evaluator mapping vehicle ids to their violating-state flags.
///
/// Evaluations for the same vehicle are serialized by the map's per-key
/// entry guard; different vehicles evaluate concurrently.
#[derive(Debug, Default)]
pub struct AlertEngine {
    states: DashMap<String, VehicleAlertState>,
}

impl AlertEngine {
    /// Create an engine with every vehicle in the NORMAL state.
    pub fn new() -> Self {
        Self {
            states: DashMap::new(),
        }
    }

    /// Evaluate one validated reading against the settings snapshot taken
    /// at this instant, returning the alerts fired by state transitions.
    pub fn evaluate(
        &self,
        reading: &TelemetryReading,
        settings: &RuntimeSettings,
    ) -> Vec<AlertEvent> {
        let mut events = Vec::new();
        let mut state = self
            .states
            .entry(reading.vehicle_id.clone())
            .or_default();

        let overspeeding = reading.speed_kmh > settings.overspeed_threshold;
        if overspeeding && !state.overspeeding {
            events.push(AlertEvent {
                vehicle_id: reading.vehicle_id.clone(),
                timestamp: reading.timestamp,
                kind: AlertKind::Overspeed,
                value: reading.speed_kmh,
                threshold: settings.overspeed_threshold,
                message: format!(
                    "Overspeed detected: {:.1} km/h > {:.1}",
                    reading.speed_kmh, settings.overspeed_threshold
                ),
            });
        }
        state.overspeeding = overspeeding;

        let door_violation = reading.door_open && reading.speed_kmh > DOOR_SPEED_FLOOR_KMH;
        if door_violation && !state.door_open_while_moving {
            events.push(AlertEvent {
                vehicle_id: reading.vehicle_id.clone(),
                timestamp: reading.timestamp,
                kind: AlertKind::DoorOpenWhileMoving,
                value: reading.speed_kmh,
                threshold: DOOR_SPEED_FLOOR_KMH,
                message: format!(
                    "Door open while moving: door is open and speed is {:.1} km/h > {:.1}",
                    reading.speed_kmh, DOOR_SPEED_FLOOR_KMH
                ),
            });
        }
        state.door_open_while_moving = door_violation;

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn settings(threshold: f64) -> RuntimeSettings {
        RuntimeSettings {
            overspeed_threshold: threshold,
            poll_interval_seconds: 5,
            relay_enabled: false,
            auto_notify_enabled: false,
        }
    }

    fn reading(vehicle_id: &str, speed_kmh: f64, door_open: bool) -> TelemetryReading {
        TelemetryReading {
            vehicle_id: vehicle_id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            lat: 25.2,
            lon: 55.3,
            speed_kmh,
            occupancy: 10,
            door_open,
            engine_on: true,
        }
    }

    #[test]
    fn test_overspeed_fires_once_per_episode() {
        let engine = AlertEngine::new();
        let settings = settings(70.0);

        // bus-9 at speeds {60, 75, 72, 65}: exactly one alert, on the
        // second sample.
        assert!(engine.evaluate(&reading("bus-9", 60.0, false), &settings).is_empty());

        let events = engine.evaluate(&reading("bus-9", 75.0, false), &settings);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AlertKind::Overspeed);
        assert_eq!(events[0].value, 75.0);
        assert_eq!(events[0].threshold, 70.0);

        assert!(engine.evaluate(&reading("bus-9", 72.0, false), &settings).is_empty());
        assert!(engine.evaluate(&reading("bus-9", 65.0, false), &settings).is_empty());
    }

    #[test]
    fn test_recovery_then_new_violation_fires_again() {
        let engine = AlertEngine::new();
        let settings = settings(70.0);

        assert_eq!(engine.evaluate(&reading("bus-1", 80.0, false), &settings).len(), 1);
        assert!(engine.evaluate(&reading("bus-1", 50.0, false), &settings).is_empty());
        assert_eq!(engine.evaluate(&reading("bus-1", 90.0, false), &settings).len(), 1);
    }

    #[test]
    fn test_door_open_scenario() {
        let engine = AlertEngine::new();
        let settings = settings(70.0);

        // bus-2: door open at 10, then 20, then closed at 20 — one alert,
        // on the first sample.
        let events = engine.evaluate(&reading("bus-2", 10.0, true), &settings);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AlertKind::DoorOpenWhileMoving);
        assert_eq!(events[0].value, 10.0);
        assert_eq!(events[0].threshold, DOOR_SPEED_FLOOR_KMH);

        assert!(engine.evaluate(&reading("bus-2", 20.0, true), &settings).is_empty());
        assert!(engine.evaluate(&reading("bus-2", 20.0, false), &settings).is_empty());
    }

    #[test]
    fn test_door_open_while_stopped_is_normal() {
        let engine = AlertEngine::new();
        let settings = settings(70.0);

        assert!(engine.evaluate(&reading("bus-3", 0.0, true), &settings).is_empty());
        assert!(engine.evaluate(&reading("bus-3", 5.0, true), &settings).is_empty());
        // Crossing the floor with the door still open is the transition.
        assert_eq!(engine.evaluate(&reading("bus-3", 6.0, true), &settings).len(), 1);
    }

    #[test]
    fn test_both_kinds_from_one_sample() {
        let engine = AlertEngine::new();
        let settings = settings(70.0);

        let events = engine.evaluate(&reading("bus-4", 85.0, true), &settings);
        assert_eq!(events.len(), 2);
        let kinds: Vec<AlertKind> = events.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&AlertKind::Overspeed));
        assert!(kinds.contains(&AlertKind::DoorOpenWhileMoving));
    }

    #[test]
    fn test_flags_are_independent() {
        let engine = AlertEngine::new();
        let settings = settings(70.0);

        // Overspeed episode begins.
        assert_eq!(engine.evaluate(&reading("bus-5", 80.0, false), &settings).len(), 1);
        // Door opens while still overspeeding: only the door alert fires.
        let events = engine.evaluate(&reading("bus-5", 82.0, true), &settings);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AlertKind::DoorOpenWhileMoving);
    }

    #[test]
    fn test_vehicles_do_not_share_state() {
        let engine = AlertEngine::new();
        let settings = settings(70.0);

        assert_eq!(engine.evaluate(&reading("bus-6", 90.0, false), &settings).len(), 1);
        // A different vehicle entering violation fires its own alert.
        assert_eq!(engine.evaluate(&reading("bus-7", 90.0, false), &settings).len(), 1);
    }

    #[test]
    fn test_threshold_update_visible_next_evaluation() {
        let engine = AlertEngine::new();

        // At threshold 70, a 75 km/h sample violates...
        assert_eq!(engine.evaluate(&reading("bus-8", 75.0, false), &settings(70.0)).len(), 1);
        assert!(engine.evaluate(&reading("bus-8", 50.0, false), &settings(70.0)).is_empty());

        // ...after raising the threshold to 80, the same speed does not.
        assert!(engine.evaluate(&reading("bus-8", 75.0, false), &settings(80.0)).is_empty());
    }

    #[test]
    fn test_speed_equal_to_threshold_is_normal() {
        let engine = AlertEngine::new();
        assert!(engine.evaluate(&reading("bus-10", 70.0, false), &settings(70.0)).is_empty());
    }

    #[test]
    fn test_restart_refires_for_ongoing_violation() {
        let settings = settings(70.0);

        let engine = AlertEngine::new();
        assert_eq!(engine.evaluate(&reading("bus-11", 90.0, false), &settings).len(), 1);

        // A fresh engine models a process restart: state defaults to
        // NORMAL, so the ongoing violation alerts again.
        let engine = AlertEngine::new();
        assert_eq!(engine.evaluate(&reading("bus-11", 90.0, false), &settings).len(), 1);
    }
}
