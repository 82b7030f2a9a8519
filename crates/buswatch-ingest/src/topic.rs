//! Telemetry and alert topic handling.

use buswatch_core::{AppError, AppResult};

/// Subscription filter covering every vehicle's telemetry topic.
pub const TELEMETRY_TOPIC_FILTER: &str = "telemetry/+";

const TELEMETRY_PREFIX: &str = "telemetry";
const ALERT_PREFIX: &str = "alerts";

/// The outbound alert topic for a vehicle.
pub fn alert_topic(vehicle_id: &str) -> String {
    format!("{ALERT_PREFIX}/{vehicle_id}")
}

/// The inbound telemetry topic for a vehicle.
pub fn telemetry_topic(vehicle_id: &str) -> String {
    format!("{TELEMETRY_PREFIX}/{vehicle_id}")
}

/// Parse a telemetry topic of the form `telemetry/{vehicleId}`, returning
/// the vehicle id segment.
pub fn parse_telemetry_topic(topic: &str) -> AppResult<&str> {
    let mut parts = topic.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(TELEMETRY_PREFIX), Some(vehicle_id), None) if !vehicle_id.trim().is_empty() => {
            Ok(vehicle_id)
        }
        _ => Err(AppError::validation(format!(
            "Invalid telemetry topic '{topic}': expected 'telemetry/{{vehicleId}}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_topic() {
        assert_eq!(parse_telemetry_topic("telemetry/bus-7").unwrap(), "bus-7");
    }

    #[test]
    fn test_parse_wrong_prefix() {
        assert!(parse_telemetry_topic("alerts/bus-7").is_err());
    }

    #[test]
    fn test_parse_missing_vehicle() {
        assert!(parse_telemetry_topic("telemetry").is_err());
        assert!(parse_telemetry_topic("telemetry/").is_err());
    }

    #[test]
    fn test_parse_too_many_segments() {
        assert!(parse_telemetry_topic("telemetry/bus-7/extra").is_err());
    }

    #[test]
    fn test_round_trip_with_builder() {
        let topic = telemetry_topic("bus-3");
        assert_eq!(parse_telemetry_topic(&topic).unwrap(), "bus-3");
    }

    #[test]
    fn test_alert_topic_shape() {
        assert_eq!(alert_topic("bus-3"), "alerts/bus-3");
    }
}
