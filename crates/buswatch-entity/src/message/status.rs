//! Driver message delivery status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a driver message.
///
/// Transitions move strictly forward (pending → sent → delivered → read);
/// `Failed` is reachable from any non-terminal state and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "message_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Created, not yet handed to the delivery path.
    Pending,
    /// Accepted by the (simulated) gateway.
    Sent,
    /// Confirmed delivered to the driver device.
    Delivered,
    /// Acknowledged read by the driver.
    Read,
    /// Delivery failed; no further transitions.
    Failed,
}

impl MessageStatus {
    /// Check if no further transitions are allowed from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Read | Self::Failed)
    }

    /// Check whether moving to `next` is a legal transition.
    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Failed => true,
            _ => next.rank() == self.rank() + 1,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Sent => 1,
            Self::Delivered => 2,
            Self::Read => 3,
            Self::Failed => 4,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(MessageStatus::Pending.can_transition_to(MessageStatus::Sent));
        assert!(MessageStatus::Sent.can_transition_to(MessageStatus::Delivered));
        assert!(MessageStatus::Delivered.can_transition_to(MessageStatus::Read));
    }

    #[test]
    fn test_no_skipping_or_regressing() {
        assert!(!MessageStatus::Pending.can_transition_to(MessageStatus::Delivered));
        assert!(!MessageStatus::Sent.can_transition_to(MessageStatus::Pending));
        assert!(!MessageStatus::Delivered.can_transition_to(MessageStatus::Sent));
    }

    #[test]
    fn test_failed_from_any_non_terminal() {
        assert!(MessageStatus::Pending.can_transition_to(MessageStatus::Failed));
        assert!(MessageStatus::Sent.can_transition_to(MessageStatus::Failed));
        assert!(MessageStatus::Delivered.can_transition_to(MessageStatus::Failed));
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(!MessageStatus::Read.can_transition_to(MessageStatus::Failed));
        assert!(!MessageStatus::Failed.can_transition_to(MessageStatus::Sent));
        assert!(MessageStatus::Read.is_terminal());
        assert!(MessageStatus::Failed.is_terminal());
    }
}
