//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// POST /api/auth/users
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreateRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    /// Plaintext password.
    #[validate(length(min = 6))]
    pub password: String,
    /// Role name; defaults to operator.
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "operator".to_string()
}

/// POST /api/auth/change-password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordChangeRequest {
    /// The caller's current password.
    pub current_password: String,
    /// The replacement password.
    #[validate(length(min = 6))]
    pub new_password: String,
}

/// Query parameters for GET /api/buses/{id}/history
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    /// Range start; defaults to one hour ago.
    pub from: Option<DateTime<Utc>>,
    /// Range end; defaults to "now".
    pub to: Option<DateTime<Utc>>,
}

/// Query parameters for GET /api/alerts
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AlertsQuery {
    /// Maximum alerts returned.
    #[serde(default = "default_alert_limit")]
    #[validate(range(min = 1, max = 200))]
    pub limit: i64,
}

fn default_alert_limit() -> i64 {
    50
}

/// PUT /api/config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdateRequest {
    /// New overspeed threshold in km/h.
    pub overspeed_threshold: Option<f64>,
    /// New polling interval hint in seconds.
    pub poll_interval_seconds: Option<i32>,
    /// New relay-forwarding flag.
    pub relay_enabled: Option<bool>,
    /// New automatic-notification flag.
    pub auto_notify_enabled: Option<bool>,
}

/// POST /api/simulators/start
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulatorStartRequest {
    /// Vehicles to start; the default fleet when omitted.
    pub bus_ids: Option<Vec<String>>,
}

/// POST /api/messages/send
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MessageSendRequest {
    /// Target vehicle.
    #[validate(length(min = 1))]
    pub bus_id: String,
    /// Referenced alert, if any.
    pub alert_id: Option<Uuid>,
    /// Template kind: overspeed, door_open, or custom.
    pub template_type: String,
    /// Optional note appended to the body.
    pub custom_note: Option<String>,
    /// Speed context echoed into the template.
    pub speed: Option<f64>,
    /// Threshold context echoed into the template.
    pub threshold: Option<f64>,
}

/// Query parameters for GET /api/messages
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MessagesQuery {
    /// Filter by vehicle id.
    pub bus_id: Option<String>,
    /// Maximum messages returned.
    #[serde(default = "default_message_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: i64,
    /// Number of messages to skip.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,
}

fn default_message_limit() -> i64 {
    100
}
