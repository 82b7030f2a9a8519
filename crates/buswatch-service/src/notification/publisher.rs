//! Seam for republishing alerts to external subscribers.

use async_trait::async_trait;

use buswatch_core::result::AppResult;
use buswatch_entity::alert::Alert;

/// Publishes persisted alerts on the outbound per-vehicle topic.
///
/// Implemented by the MQTT transport crate; the dispatcher treats failures
/// as best-effort (logged and swallowed) since the alert is already durable.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    /// Publish one alert for any external subscriber.
    async fn publish_alert(&self, alert: &Alert) -> AppResult<()>;
}

/// Publisher that drops every alert. Used where no broker is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAlertPublisher;

#[async_trait]
impl AlertPublisher for NoopAlertPublisher {
    async fn publish_alert(&self, _alert: &Alert) -> AppResult<()> {
        Ok(())
    }
}
