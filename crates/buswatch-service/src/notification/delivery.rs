//! Simulated driver message delivery.
//!
//! The dispatcher advances pending → sent immediately; the later
//! sent → delivered → read transitions run in a detached task with fixed
//! delays. A failed status update marks the message failed (terminal).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use buswatch_core::result::AppResult;
use buswatch_database::repositories::message::MessageRepository;
use buswatch_entity::message::MessageStatus;

/// Delay before delivery is confirmed.
const DELIVERY_DELAY: Duration = Duration::from_secs(3);
/// Delay between delivery and the driver's read acknowledgment.
const READ_DELAY: Duration = Duration::from_secs(8);

/// Spawn the delivery simulation for a freshly created message.
///
/// Runs detached so delivery latency never blocks alert persistence or the
/// HTTP response that created the message.
pub fn spawn_delivery(repo: Arc<MessageRepository>, message_id: Uuid) {
    tokio::spawn(async move {
        if let Err(e) = run_lifecycle(&repo, message_id).await {
            warn!(%message_id, error = %e, "Driver message delivery simulation failed");
            if let Err(e) = repo
                .update_status(
                    message_id,
                    MessageStatus::Failed,
                    None,
                    None,
                    Some(&e.to_string()),
                )
                .await
            {
                warn!(%message_id, error = %e, "Failed to mark message as failed");
            }
        }
    });
}

async fn run_lifecycle(repo: &MessageRepository, message_id: Uuid) -> AppResult<()> {
    repo.update_status(message_id, MessageStatus::Sent, None, None, None)
        .await?;
    info!(%message_id, "Driver message sent");

    tokio::time::sleep(DELIVERY_DELAY).await;
    repo.update_status(
        message_id,
        MessageStatus::Delivered,
        Some(Utc::now()),
        None,
        None,
    )
    .await?;
    info!(%message_id, "Driver message delivered");

    tokio::time::sleep(READ_DELAY).await;
    repo.update_status(message_id, MessageStatus::Read, None, Some(Utc::now()), None)
        .await?;
    info!(%message_id, "Driver message read");

    Ok(())
}
