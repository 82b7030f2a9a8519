//! Telemetry payload decoding and validation.

use buswatch_core::{AppError, AppResult};
use buswatch_entity::telemetry::TelemetryReading;

/// Decode and validate a raw telemetry payload.
///
/// The payload's vehicle id must match the topic segment it arrived on;
/// a mismatch is dropped like any other invalid record.
pub fn decode_reading(topic_vehicle_id: &str, payload: &[u8]) -> AppResult<TelemetryReading> {
    let reading: TelemetryReading = serde_json::from_slice(payload)
        .map_err(|e| AppError::validation(format!("Malformed telemetry payload: {e}")))?;

    reading.validate()?;

    if reading.vehicle_id != topic_vehicle_id {
        return Err(AppError::validation(format!(
            "Vehicle id mismatch: topic '{topic_vehicle_id}' vs payload '{}'",
            reading.vehicle_id
        )));
    }

    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(vehicle_id: &str, speed: &str) -> String {
        format!(
            r#"{{"busId": "{vehicle_id}", "timestamp": "2024-05-01T08:30:00Z",
                "lat": 25.2, "lon": 55.3, "speed_kmh": {speed},
                "occupancy": 7, "door_open": false, "engine_on": true}}"#
        )
    }

    #[test]
    fn test_decode_valid_payload() {
        let reading = decode_reading("bus-7", payload("bus-7", "48.5").as_bytes()).unwrap();
        assert_eq!(reading.vehicle_id, "bus-7");
        assert_eq!(reading.speed_kmh, 48.5);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(decode_reading("bus-7", b"{not json").is_err());
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(decode_reading("bus-7", br#"{"busId": "bus-7"}"#).is_err());
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let payload = br#"{"busId": "bus-7", "timestamp": "yesterday",
            "lat": 25.2, "lon": 55.3, "speed_kmh": 10.0,
            "occupancy": 7, "door_open": false, "engine_on": true}"#;
        assert!(decode_reading("bus-7", payload).is_err());
    }

    #[test]
    fn test_topic_mismatch_rejected() {
        let err = decode_reading("bus-9", payload("bus-7", "48.5").as_bytes()).unwrap_err();
        assert!(err.message.contains("mismatch"));
    }

    #[test]
    fn test_out_of_range_speed_rejected() {
        assert!(decode_reading("bus-7", payload("bus-7", "1e400").as_bytes()).is_err());
    }
}
