//! Driver message template kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Template used to render a driver message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "template_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageTemplateKind {
    /// Overspeed warning.
    Overspeed,
    /// Door-open-while-moving warning.
    DoorOpen,
    /// Free-form operator message.
    Custom,
}

impl MessageTemplateKind {
    /// Return the kind as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overspeed => "overspeed",
            Self::DoorOpen => "door_open",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for MessageTemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageTemplateKind {
    type Err = buswatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overspeed" => Ok(Self::Overspeed),
            "door_open" => Ok(Self::DoorOpen),
            "custom" => Ok(Self::Custom),
            _ => Err(buswatch_core::AppError::validation(format!(
                "template_type must be 'overspeed', 'door_open', or 'custom', got '{s}'"
            ))),
        }
    }
}
