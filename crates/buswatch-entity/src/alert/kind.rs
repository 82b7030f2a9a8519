//! Alert kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of safety violations the alert engine detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Speed above the configured overspeed threshold.
    Overspeed,
    /// Door open while the vehicle is moving.
    DoorOpenWhileMoving,
}

impl AlertKind {
    /// Return the kind as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overspeed => "overspeed",
            Self::DoorOpenWhileMoving => "door_open_while_moving",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = buswatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overspeed" => Ok(Self::Overspeed),
            "door_open_while_moving" => Ok(Self::DoorOpenWhileMoving),
            _ => Err(buswatch_core::AppError::validation(format!(
                "Invalid alert kind: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings() {
        assert_eq!(AlertKind::Overspeed.as_str(), "overspeed");
        assert_eq!(
            AlertKind::DoorOpenWhileMoving.as_str(),
            "door_open_while_moving"
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "overspeed".parse::<AlertKind>().unwrap(),
            AlertKind::Overspeed
        );
        assert!("speeding".parse::<AlertKind>().is_err());
    }
}
