//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use sqlx::PgPool;

use buswatch_auth::jwt::JwtDecoder;
use buswatch_core::config::AppConfig;
use buswatch_service::alert::AlertService;
use buswatch_service::notification::MessageService;
use buswatch_service::settings::SettingsService;
use buswatch_service::telemetry::TelemetryService;
use buswatch_service::user::UserService;
use buswatch_simulator::SimulatorManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool (health checks)
    pub db_pool: PgPool,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Telemetry queries
    pub telemetry_service: Arc<TelemetryService>,
    /// Alert queries
    pub alert_service: Arc<AlertService>,
    /// Driver messaging
    pub message_service: Arc<MessageService>,
    /// Runtime settings singleton
    pub settings_service: Arc<SettingsService>,
    /// Users and credentials
    pub user_service: Arc<UserService>,
    /// Simulator fleet control
    pub simulator: Arc<SimulatorManager>,
}
