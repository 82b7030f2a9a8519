//! The telemetry wire payload published on `telemetry/{vehicleId}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use buswatch_core::{AppError, AppResult};

/// A decoded telemetry message as published by a vehicle.
///
/// Field names are the stable wire contract shared with the simulators and
/// the REST read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReading {
    /// Publishing vehicle id.
    #[serde(rename = "busId")]
    pub vehicle_id: String,
    /// Producer-supplied event timestamp (UTC).
    pub timestamp: DateTime<Utc>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Speed in km/h.
    pub speed_kmh: f64,
    /// Passenger count.
    pub occupancy: i32,
    /// Whether any door is open.
    pub door_open: bool,
    /// Whether the engine is running.
    pub engine_on: bool,
}

impl TelemetryReading {
    /// Validate the decoded reading.
    ///
    /// The vehicle id must be non-empty and position/speed must be finite.
    /// Timestamp validity is enforced by deserialization.
    pub fn validate(&self) -> AppResult<()> {
        if self.vehicle_id.trim().is_empty() {
            return Err(AppError::validation("Vehicle id must be non-empty"));
        }
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(AppError::validation(format!(
                "Non-finite position for vehicle '{}'",
                self.vehicle_id
            )));
        }
        if !self.speed_kmh.is_finite() {
            return Err(AppError::validation(format!(
                "Non-finite speed for vehicle '{}'",
                self.vehicle_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading() -> TelemetryReading {
        TelemetryReading {
            vehicle_id: "bus-7".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            lat: 25.2048,
            lon: 55.2708,
            speed_kmh: 42.5,
            occupancy: 12,
            door_open: false,
            engine_on: true,
        }
    }

    #[test]
    fn test_valid_reading() {
        assert!(reading().validate().is_ok());
    }

    #[test]
    fn test_empty_vehicle_id_rejected() {
        let mut r = reading();
        r.vehicle_id = "  ".to_string();
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut r = reading();
        r.lat = f64::NAN;
        assert!(r.validate().is_err());

        let mut r = reading();
        r.speed_kmh = f64::INFINITY;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(reading()).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "busId",
            "timestamp",
            "lat",
            "lon",
            "speed_kmh",
            "occupancy",
            "door_open",
            "engine_on",
        ] {
            assert!(object.contains_key(key), "missing wire field {key}");
        }
        assert!(!object.contains_key("vehicle_id"));
    }

    #[test]
    fn test_decode_from_wire_json() {
        let payload = r#"{
            "busId": "bus-3",
            "timestamp": "2024-05-01T08:30:00Z",
            "lat": 25.1,
            "lon": 55.2,
            "speed_kmh": 61.0,
            "occupancy": 4,
            "door_open": true,
            "engine_on": true
        }"#;
        let decoded: TelemetryReading = serde_json::from_str(payload).unwrap();
        assert_eq!(decoded.vehicle_id, "bus-3");
        assert!(decoded.door_open);
    }
}
