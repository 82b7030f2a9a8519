//! Alert queries.

use std::sync::Arc;

use buswatch_core::result::AppResult;
use buswatch_database::repositories::alert::AlertRepository;
use buswatch_entity::alert::Alert;

/// Read-side service over persisted alerts.
#[derive(Debug, Clone)]
pub struct AlertService {
    alert_repo: Arc<AlertRepository>,
}

impl AlertService {
    /// Creates a new alert service.
    pub fn new(alert_repo: Arc<AlertRepository>) -> Self {
        Self { alert_repo }
    }

    /// Most recent alerts first, bounded by `limit`.
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<Alert>> {
        self.alert_repo.find_recent(limit).await
    }
}
