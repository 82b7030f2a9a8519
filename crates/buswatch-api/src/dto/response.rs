//! Response DTOs.
//!
//! Field names reuse the telemetry wire contract byte-for-byte, so the
//! dashboard sees the same names on MQTT and REST.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use buswatch_entity::alert::{Alert, AlertKind};
use buswatch_entity::message::{DriverMessage, MessageStatus, MessageTemplateKind};
use buswatch_entity::telemetry::{LatestTelemetry, TelemetrySample};
use buswatch_entity::user::User;

/// One row of GET /api/buses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusResponse {
    /// Vehicle id.
    #[serde(rename = "busId")]
    pub vehicle_id: String,
    /// Event timestamp of the newest sample.
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
    /// Display name from the registry.
    pub name: Option<String>,
    /// Seat capacity from the registry.
    pub capacity: Option<i32>,
}

impl From<LatestTelemetry> for BusResponse {
    fn from(row: LatestTelemetry) -> Self {
        Self {
            vehicle_id: row.vehicle_id,
            timestamp: row.timestamp,
            lat: row.lat,
            lon: row.lon,
            speed_kmh: row.speed_kmh,
            occupancy: row.occupancy,
            door_open: row.door_open,
            engine_on: row.engine_on,
            name: row.name,
            capacity: row.capacity,
        }
    }
}

/// One row of GET /api/buses/{id}/history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryResponse {
    /// Vehicle id.
    #[serde(rename = "busId")]
    pub vehicle_id: String,
    /// Event timestamp.
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

impl From<TelemetrySample> for TelemetryResponse {
    fn from(sample: TelemetrySample) -> Self {
        Self {
            vehicle_id: sample.vehicle_id,
            timestamp: sample.timestamp,
            lat: sample.lat,
            lon: sample.lon,
            speed_kmh: sample.speed_kmh,
            occupancy: sample.occupancy,
            door_open: sample.door_open,
            engine_on: sample.engine_on,
        }
    }
}

/// One row of GET /api/alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertResponse {
    /// Alert id.
    pub id: Uuid,
    /// Vehicle id.
    #[serde(rename = "busId")]
    pub vehicle_id: String,
    /// Event timestamp of the triggering sample.
    pub timestamp: DateTime<Utc>,
    /// Violation kind.
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Measured value.
    pub value: f64,
    /// Threshold in effect when the alert fired.
    pub threshold: f64,
    /// Human-readable summary.
    pub message: String,
}

impl From<Alert> for AlertResponse {
    fn from(alert: Alert) -> Self {
        Self {
            id: alert.id,
            vehicle_id: alert.vehicle_id,
            timestamp: alert.timestamp,
            kind: alert.kind,
            value: alert.value,
            threshold: alert.threshold,
            message: alert.message,
        }
    }
}

/// POST /api/auth/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
    /// Authenticated username.
    pub username: String,
    /// Authenticated role.
    pub role: String,
}

/// User as returned by the admin endpoints and /auth/me.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Role name.
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role.to_string(),
        }
    }
}

/// Driver message as returned by the messaging endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message id.
    pub id: Uuid,
    /// Target vehicle.
    #[serde(rename = "busId")]
    pub vehicle_id: String,
    /// Referenced alert, if any.
    #[serde(rename = "alertId")]
    pub alert_id: Option<Uuid>,
    /// Rendered body text.
    pub message_text: String,
    /// Template the body was rendered from.
    pub template_type: MessageTemplateKind,
    /// Optional operator note.
    pub custom_note: Option<String>,
    /// Sending operator; absent for automatic sends.
    #[serde(rename = "sentByUserId")]
    pub sent_by: Option<Uuid>,
    /// When the message was created.
    #[serde(rename = "sentAt")]
    pub sent_at: DateTime<Utc>,
    /// Current delivery status.
    pub status: MessageStatus,
    /// When delivery was confirmed.
    #[serde(rename = "deliveredAt")]
    pub delivered_at: Option<DateTime<Utc>>,
    /// When the driver read the message.
    #[serde(rename = "readAt")]
    pub read_at: Option<DateTime<Utc>>,
    /// Failure reason if failed.
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
}

impl From<DriverMessage> for MessageResponse {
    fn from(message: DriverMessage) -> Self {
        Self {
            id: message.id,
            vehicle_id: message.vehicle_id,
            alert_id: message.alert_id,
            message_text: message.body,
            template_type: message.template_kind,
            custom_note: message.custom_note,
            sent_by: message.sent_by,
            sent_at: message.sent_at,
            status: message.status,
            delivered_at: message.delivered_at,
            read_at: message.read_at,
            error_message: message.error_message,
        }
    }
}

/// Simple acknowledgment body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAck {
    /// Human-readable confirmation.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bus_response_wire_names() {
        let row = LatestTelemetry {
            vehicle_id: "bus-7".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            lat: 25.2,
            lon: 55.3,
            speed_kmh: 42.0,
            occupancy: 3,
            door_open: false,
            engine_on: true,
            name: Some("Route 7".to_string()),
            capacity: Some(30),
        };
        let json = serde_json::to_value(BusResponse::from(row)).unwrap();
        assert_eq!(json["busId"], "bus-7");
        assert_eq!(json["speed_kmh"], 42.0);
        assert!(json.get("vehicle_id").is_none());
    }

    #[test]
    fn test_alert_response_kind_named_type() {
        let alert = Alert {
            id: Uuid::new_v4(),
            vehicle_id: "bus-7".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            kind: AlertKind::Overspeed,
            value: 85.0,
            threshold: 70.0,
            message: "Overspeed detected: 85.0 km/h > 70.0".to_string(),
        };
        let json = serde_json::to_value(AlertResponse::from(alert)).unwrap();
        assert_eq!(json["type"], "overspeed");
        assert_eq!(json["busId"], "bus-7");
    }

    #[test]
    fn test_message_response_wire_names() {
        let message = DriverMessage::new(
            "bus-2",
            MessageTemplateKind::DoorOpen,
            "ALERT: Door is open while bus is moving",
            None,
            None,
            None,
        );
        let json = serde_json::to_value(MessageResponse::from(message)).unwrap();
        assert_eq!(json["busId"], "bus-2");
        assert_eq!(json["template_type"], "door_open");
        assert_eq!(json["status"], "pending");
        assert!(json.get("body").is_none());
    }
}
