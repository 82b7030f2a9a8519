//! Operator-facing driver messaging.

use std::sync::Arc;

use uuid::Uuid;

use buswatch_core::error::AppError;
use buswatch_core::result::AppResult;
use buswatch_database::repositories::alert::AlertRepository;
use buswatch_database::repositories::message::MessageRepository;
use buswatch_database::repositories::vehicle::VehicleRepository;
use buswatch_entity::message::{DriverMessage, MessageTemplateKind};

use super::delivery;
use super::templates;
use super::templates::TemplateInfo;

/// A request to send a driver message.
#[derive(Debug, Clone)]
pub struct SendMessage {
    /// Target vehicle.
    pub vehicle_id: String,
    /// Referenced alert, if any.
    pub alert_id: Option<Uuid>,
    /// Template to render.
    pub template_kind: MessageTemplateKind,
    /// Optional note appended to the body.
    pub custom_note: Option<String>,
    /// Speed context echoed into the template.
    pub speed: Option<f64>,
    /// Threshold context echoed into the template.
    pub threshold: Option<f64>,
}

/// Sends and queries driver messages.
pub struct MessageService {
    message_repo: Arc<MessageRepository>,
    alert_repo: Arc<AlertRepository>,
    vehicle_repo: Arc<VehicleRepository>,
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(
        message_repo: Arc<MessageRepository>,
        alert_repo: Arc<AlertRepository>,
        vehicle_repo: Arc<VehicleRepository>,
    ) -> Self {
        Self {
            message_repo,
            alert_repo,
            vehicle_repo,
        }
    }

    /// Send a driver message on behalf of an operator.
    ///
    /// When an alert is referenced it must exist and belong to the target
    /// vehicle; its value/threshold fill in missing context. Speed and
    /// threshold are echoed into the template, not re-validated against
    /// current engine state.
    pub async fn send(
        &self,
        request: SendMessage,
        sent_by: Option<Uuid>,
    ) -> AppResult<DriverMessage> {
        if !self.vehicle_repo.exists(&request.vehicle_id).await? {
            return Err(AppError::not_found(format!(
                "Vehicle '{}' not found",
                request.vehicle_id
            )));
        }

        let mut speed = request.speed;
        let mut threshold = request.threshold;
        if let Some(alert_id) = request.alert_id {
            let alert = self
                .alert_repo
                .find_by_id(alert_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Alert {alert_id} not found")))?;
            if alert.vehicle_id != request.vehicle_id {
                return Err(AppError::validation(
                    "Alert does not belong to specified bus",
                ));
            }
            if speed.is_none() {
                speed = Some(alert.value);
            }
            if threshold.is_none() && request.template_kind == MessageTemplateKind::Overspeed {
                threshold = Some(alert.threshold);
            }
        }

        let body = templates::render(
            request.template_kind,
            speed,
            threshold,
            request.custom_note.as_deref(),
        );
        let message = DriverMessage::new(
            request.vehicle_id,
            request.template_kind,
            body,
            request.custom_note,
            request.alert_id,
            sent_by,
        );
        self.message_repo.insert(&message).await?;

        delivery::spawn_delivery(Arc::clone(&self.message_repo), message.id);
        Ok(message)
    }

    /// List messages, newest first, optionally filtered by vehicle.
    pub async fn list(
        &self,
        vehicle_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<DriverMessage>> {
        self.message_repo.find(vehicle_id, limit, offset).await
    }

    /// Fetch a single message.
    pub async fn get(&self, id: Uuid) -> AppResult<DriverMessage> {
        self.message_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Message {id} not found")))
    }

    /// The template catalogue shown to operators.
    pub fn templates(&self) -> Vec<TemplateInfo> {
        templates::available_templates()
    }
}
