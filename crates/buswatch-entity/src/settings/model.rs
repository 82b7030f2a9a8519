//! The mutable runtime configuration shared by ingestion, alerting, and
//! relay forwarding.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use buswatch_core::config::settings::SettingsDefaults;
use buswatch_core::{AppError, AppResult};

/// Lowest accepted overspeed threshold in km/h.
pub const MIN_OVERSPEED_THRESHOLD: f64 = 40.0;
/// Highest accepted overspeed threshold in km/h.
pub const MAX_OVERSPEED_THRESHOLD: f64 = 150.0;
/// Accepted polling interval range in seconds.
pub const POLL_INTERVAL_RANGE: std::ops::RangeInclusive<i32> = 1..=60;

/// The process-wide configuration singleton.
///
/// Readers always observe a full consistent value: the live copy is an
/// immutable snapshot swapped atomically on update, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RuntimeSettings {
    /// Overspeed alert threshold in km/h.
    pub overspeed_threshold: f64,
    /// Suggested polling interval for read-side consumers, in seconds.
    pub poll_interval_seconds: i32,
    /// Whether telemetry is mirrored to the third-party relay.
    pub relay_enabled: bool,
    /// Whether alerts automatically synthesize driver messages.
    pub auto_notify_enabled: bool,
}

impl RuntimeSettings {
    /// Build the initial settings from configured defaults.
    pub fn from_defaults(defaults: &SettingsDefaults) -> Self {
        Self {
            overspeed_threshold: defaults.overspeed_threshold,
            poll_interval_seconds: defaults.poll_interval_seconds,
            relay_enabled: defaults.relay_enabled,
            auto_notify_enabled: defaults.auto_notify_enabled,
        }
    }

    /// Apply a patch, validating every changed field.
    ///
    /// Returns the new settings value; `self` is untouched so the caller can
    /// keep serving the old snapshot when validation fails.
    pub fn with_patch(&self, patch: &SettingsPatch) -> AppResult<RuntimeSettings> {
        let mut next = self.clone();
        if let Some(threshold) = patch.overspeed_threshold {
            if !(MIN_OVERSPEED_THRESHOLD..=MAX_OVERSPEED_THRESHOLD).contains(&threshold) {
                return Err(AppError::validation(format!(
                    "overspeed_threshold must be between {MIN_OVERSPEED_THRESHOLD} and \
                     {MAX_OVERSPEED_THRESHOLD} km/h, got {threshold}"
                )));
            }
            next.overspeed_threshold = threshold;
        }
        if let Some(interval) = patch.poll_interval_seconds {
            if !POLL_INTERVAL_RANGE.contains(&interval) {
                return Err(AppError::validation(format!(
                    "poll_interval_seconds must be between {} and {} seconds, got {interval}",
                    POLL_INTERVAL_RANGE.start(),
                    POLL_INTERVAL_RANGE.end()
                )));
            }
            next.poll_interval_seconds = interval;
        }
        if let Some(enabled) = patch.relay_enabled {
            next.relay_enabled = enabled;
        }
        if let Some(enabled) = patch.auto_notify_enabled {
            next.auto_notify_enabled = enabled;
        }
        Ok(next)
    }
}

/// A partial update to the runtime settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    /// New overspeed threshold, if changing.
    pub overspeed_threshold: Option<f64>,
    /// New polling interval hint, if changing.
    pub poll_interval_seconds: Option<i32>,
    /// New relay flag, if changing.
    pub relay_enabled: Option<bool>,
    /// New auto-notification flag, if changing.
    pub auto_notify_enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RuntimeSettings {
        RuntimeSettings {
            overspeed_threshold: 70.0,
            poll_interval_seconds: 5,
            relay_enabled: false,
            auto_notify_enabled: false,
        }
    }

    #[test]
    fn test_patch_applies_changed_fields() {
        let patch = SettingsPatch {
            overspeed_threshold: Some(80.0),
            auto_notify_enabled: Some(true),
            ..SettingsPatch::default()
        };
        let next = settings().with_patch(&patch).unwrap();
        assert_eq!(next.overspeed_threshold, 80.0);
        assert_eq!(next.poll_interval_seconds, 5);
        assert!(next.auto_notify_enabled);
    }

    #[test]
    fn test_threshold_below_floor_rejected() {
        let patch = SettingsPatch {
            overspeed_threshold: Some(30.0),
            ..SettingsPatch::default()
        };
        let current = settings();
        assert!(current.with_patch(&patch).is_err());
        // The old value stays live for subsequent evaluations.
        assert_eq!(current.overspeed_threshold, 70.0);
    }

    #[test]
    fn test_threshold_above_ceiling_rejected() {
        let patch = SettingsPatch {
            overspeed_threshold: Some(200.0),
            ..SettingsPatch::default()
        };
        assert!(settings().with_patch(&patch).is_err());
    }

    #[test]
    fn test_poll_interval_bounds() {
        let patch = SettingsPatch {
            poll_interval_seconds: Some(0),
            ..SettingsPatch::default()
        };
        assert!(settings().with_patch(&patch).is_err());

        let patch = SettingsPatch {
            poll_interval_seconds: Some(60),
            ..SettingsPatch::default()
        };
        assert_eq!(
            settings().with_patch(&patch).unwrap().poll_interval_seconds,
            60
        );
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let current = settings();
        let next = current.with_patch(&SettingsPatch::default()).unwrap();
        assert_eq!(next, current);
    }
}
