//! Driver message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::MessageStatus;
use super::template::MessageTemplateKind;

/// A (simulated) SMS notification to a vehicle driver.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// Target vehicle.
    pub vehicle_id: String,
    /// Originating alert, if any. Always an alert for the same vehicle.
    pub alert_id: Option<Uuid>,
    /// Template the body was rendered from.
    pub template_kind: MessageTemplateKind,
    /// Rendered body text.
    pub body: String,
    /// Optional operator note appended to the body.
    pub custom_note: Option<String>,
    /// Operator who sent the message; `None` for automatic sends.
    pub sent_by: Option<Uuid>,
    /// When the message was created.
    pub sent_at: DateTime<Utc>,
    /// Current delivery status.
    pub status: MessageStatus,
    /// When delivery was confirmed.
    pub delivered_at: Option<DateTime<Utc>>,
    /// When the driver read the message.
    pub read_at: Option<DateTime<Utc>>,
    /// Failure reason if status is `failed`.
    pub error_message: Option<String>,
}

impl DriverMessage {
    /// Create a new pending message.
    pub fn new(
        vehicle_id: impl Into<String>,
        template_kind: MessageTemplateKind,
        body: impl Into<String>,
        custom_note: Option<String>,
        alert_id: Option<Uuid>,
        sent_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: vehicle_id.into(),
            alert_id,
            template_kind,
            body: body.into(),
            custom_note,
            sent_by,
            sent_at: Utc::now(),
            status: MessageStatus::Pending,
            delivered_at: None,
            read_at: None,
            error_message: None,
        }
    }
}
