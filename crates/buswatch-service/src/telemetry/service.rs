//! The ingest pipeline and telemetry read queries.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::error;

use buswatch_core::error::AppError;
use buswatch_core::result::AppResult;
use buswatch_database::repositories::telemetry::TelemetryRepository;
use buswatch_database::repositories::vehicle::VehicleRepository;
use buswatch_entity::telemetry::{LatestTelemetry, TelemetryReading, TelemetrySample};

use crate::alert::AlertEngine;
use crate::notification::NotificationDispatcher;
use crate::settings::SettingsService;

/// Default history window when the caller omits `from`.
const DEFAULT_HISTORY_WINDOW_HOURS: i64 = 1;

/// Persists validated telemetry and drives alert evaluation.
pub struct TelemetryService {
    vehicle_repo: Arc<VehicleRepository>,
    telemetry_repo: Arc<TelemetryRepository>,
    engine: Arc<AlertEngine>,
    settings: Arc<SettingsService>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl TelemetryService {
    /// Creates a new telemetry service.
    pub fn new(
        vehicle_repo: Arc<VehicleRepository>,
        telemetry_repo: Arc<TelemetryRepository>,
        engine: Arc<AlertEngine>,
        settings: Arc<SettingsService>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            vehicle_repo,
            telemetry_repo,
            engine,
            settings,
            dispatcher,
        }
    }

    /// Ingest one validated reading: register the vehicle on first
    /// sighting, append the sample, then evaluate it against the settings
    /// snapshot taken at this instant.
    ///
    /// Persistence and evaluation complete before the caller consumes the
    /// next message. A dispatch failure for one alert is logged and does
    /// not abort the remaining events or the ingest itself.
    pub async fn ingest(&self, reading: &TelemetryReading) -> AppResult<TelemetrySample> {
        self.vehicle_repo.upsert_sighting(&reading.vehicle_id).await?;
        let sample = self.telemetry_repo.insert(reading).await?;

        let settings = self.settings.snapshot();
        for event in self.engine.evaluate(reading, &settings) {
            if let Err(e) = self.dispatcher.dispatch(event, &settings).await {
                error!(
                    vehicle_id = %reading.vehicle_id,
                    error = %e,
                    "Failed to dispatch alert"
                );
            }
        }

        Ok(sample)
    }

    /// One row per known vehicle with its newest sample.
    pub async fn latest_snapshot(&self) -> AppResult<Vec<LatestTelemetry>> {
        self.telemetry_repo.latest_snapshot().await
    }

    /// Time-range history for one vehicle, ascending by timestamp.
    ///
    /// `from` defaults to one hour ago; an inverted range is a validation
    /// error; an unknown vehicle is NotFound.
    pub async fn history(
        &self,
        vehicle_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<TelemetrySample>> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(AppError::validation("`from` must be earlier than `to`."));
            }
        }
        self.vehicle_repo
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Vehicle '{vehicle_id}' not found")))?;

        let from = from.unwrap_or_else(|| Utc::now() - Duration::hours(DEFAULT_HISTORY_WINDOW_HOURS));
        self.telemetry_repo.history(vehicle_id, from, to).await
    }
}
