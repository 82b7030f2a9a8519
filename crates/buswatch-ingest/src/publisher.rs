//! Outbound alert publishing on `alerts/{vehicleId}`.

use async_trait::async_trait;
use rumqttc::{AsyncClient, QoS};

use buswatch_core::{AppError, AppResult};
use buswatch_entity::alert::Alert;
use buswatch_service::notification::AlertPublisher;

use crate::topic::alert_topic;

/// Republishes persisted alerts on the shared broker connection.
#[derive(Clone)]
pub struct MqttAlertPublisher {
    client: AsyncClient,
}

impl MqttAlertPublisher {
    /// Creates a publisher over an existing broker connection.
    pub fn new(client: AsyncClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlertPublisher for MqttAlertPublisher {
    async fn publish_alert(&self, alert: &Alert) -> AppResult<()> {
        let payload = serde_json::json!({
            "busId": alert.vehicle_id,
            "timestamp": alert.timestamp,
            "type": alert.kind,
            "value": alert.value,
            "threshold": alert.threshold,
            "message": alert.message,
        });

        // try_publish: a down broker must not stall alert dispatch behind
        // a full request queue.
        self.client
            .try_publish(
                alert_topic(&alert.vehicle_id),
                QoS::AtLeastOnce,
                false,
                serde_json::to_vec(&payload)?,
            )
            .map_err(|e| AppError::upstream(format!("Failed to publish alert: {e}")))
    }
}
