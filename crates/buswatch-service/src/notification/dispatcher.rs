//! Consumes alert events from the engine: persists, republishes, and
//! optionally notifies the driver.

use std::sync::Arc;

use tracing::{info, warn};

use buswatch_core::result::AppResult;
use buswatch_database::repositories::alert::AlertRepository;
use buswatch_database::repositories::message::MessageRepository;
use buswatch_entity::alert::{Alert, AlertEvent, AlertKind};
use buswatch_entity::message::{DriverMessage, MessageTemplateKind};
use buswatch_entity::settings::RuntimeSettings;

use super::delivery;
use super::publisher::AlertPublisher;
use super::templates;

/// Handles every alert the engine emits.
pub struct NotificationDispatcher {
    alert_repo: Arc<AlertRepository>,
    message_repo: Arc<MessageRepository>,
    publisher: Arc<dyn AlertPublisher>,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        alert_repo: Arc<AlertRepository>,
        message_repo: Arc<MessageRepository>,
        publisher: Arc<dyn AlertPublisher>,
    ) -> Self {
        Self {
            alert_repo,
            message_repo,
            publisher,
        }
    }

    /// Dispatch one alert event.
    ///
    /// Persistence is the durability boundary: it must succeed, and the
    /// error propagates if it does not. The outbound republish and the
    /// automatic driver message are best-effort after that point.
    pub async fn dispatch(
        &self,
        event: AlertEvent,
        settings: &RuntimeSettings,
    ) -> AppResult<Alert> {
        let alert = event.into_alert();
        self.alert_repo.insert(&alert).await?;
        info!(
            vehicle_id = %alert.vehicle_id,
            kind = %alert.kind,
            value = alert.value,
            threshold = alert.threshold,
            "Alert raised"
        );

        if let Err(e) = self.publisher.publish_alert(&alert).await {
            warn!(
                vehicle_id = %alert.vehicle_id,
                error = %e,
                "Failed to republish alert on outbound topic"
            );
        }

        if settings.auto_notify_enabled {
            if let Err(e) = self.notify_driver(&alert).await {
                warn!(
                    vehicle_id = %alert.vehicle_id,
                    error = %e,
                    "Failed to create automatic driver message"
                );
            }
        }

        Ok(alert)
    }

    /// Synthesize a pending driver message for an alert and start its
    /// simulated delivery.
    async fn notify_driver(&self, alert: &Alert) -> AppResult<()> {
        let template_kind = match alert.kind {
            AlertKind::Overspeed => MessageTemplateKind::Overspeed,
            AlertKind::DoorOpenWhileMoving => MessageTemplateKind::DoorOpen,
        };
        let body = templates::render(
            template_kind,
            Some(alert.value),
            Some(alert.threshold),
            None,
        );

        let message = DriverMessage::new(
            alert.vehicle_id.clone(),
            template_kind,
            body,
            None,
            Some(alert.id),
            None,
        );
        self.message_repo.insert(&message).await?;
        info!(
            vehicle_id = %alert.vehicle_id,
            message_id = %message.id,
            "Automatic driver message created"
        );

        delivery::spawn_delivery(Arc::clone(&self.message_repo), message.id);
        Ok(())
    }
}
