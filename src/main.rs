//! BusWatch Server — Vehicle Telemetry Ingestion & Alerting Backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt};

use buswatch_core::config::AppConfig;
use buswatch_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("BUSWATCH_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting BusWatch v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = buswatch_database::connection::create_pool(&config.database).await?;
    buswatch_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let vehicle_repo = Arc::new(buswatch_database::repositories::vehicle::VehicleRepository::new(
        db_pool.clone(),
    ));
    let telemetry_repo = Arc::new(
        buswatch_database::repositories::telemetry::TelemetryRepository::new(db_pool.clone()),
    );
    let alert_repo = Arc::new(buswatch_database::repositories::alert::AlertRepository::new(
        db_pool.clone(),
    ));
    let message_repo = Arc::new(
        buswatch_database::repositories::message::MessageRepository::new(db_pool.clone()),
    );
    let settings_repo = Arc::new(
        buswatch_database::repositories::settings::SettingsRepository::new(db_pool.clone()),
    );
    let user_repo = Arc::new(buswatch_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: Runtime settings snapshot ────────────────────────
    let settings_service = Arc::new(
        buswatch_service::settings::SettingsService::load(
            Arc::clone(&settings_repo),
            &config.settings,
        )
        .await?,
    );

    // ── Step 4: Auth + users ─────────────────────────────────────
    let password_hasher = Arc::new(buswatch_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(buswatch_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(buswatch_auth::jwt::JwtDecoder::new(&config.auth));

    let user_service = Arc::new(buswatch_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
    ));
    user_service.bootstrap_default_users().await?;

    // ── Step 5: MQTT connection + alerting pipeline ──────────────
    let (mqtt_client, mqtt_eventloop) =
        buswatch_ingest::TelemetryIngestor::connect(&config.mqtt);

    let alert_publisher = Arc::new(buswatch_ingest::MqttAlertPublisher::new(mqtt_client.clone()));
    let dispatcher = Arc::new(buswatch_service::notification::NotificationDispatcher::new(
        Arc::clone(&alert_repo),
        Arc::clone(&message_repo),
        alert_publisher,
    ));
    let engine = Arc::new(buswatch_service::alert::AlertEngine::new());

    let telemetry_service = Arc::new(buswatch_service::telemetry::TelemetryService::new(
        Arc::clone(&vehicle_repo),
        Arc::clone(&telemetry_repo),
        Arc::clone(&engine),
        Arc::clone(&settings_service),
        Arc::clone(&dispatcher),
    ));

    // ── Step 6: Ingestor + relay forwarder ───────────────────────
    let relay = Arc::new(buswatch_ingest::RelayForwarder::new(config.relay.clone()));
    let ingestor = buswatch_ingest::TelemetryIngestor::new(
        Arc::clone(&telemetry_service),
        Arc::clone(&settings_service),
        Arc::clone(&relay),
    );

    let shutdown_token = CancellationToken::new();
    let ingest_token = shutdown_token.clone();
    let ingest_handle = tokio::spawn(async move {
        ingestor.run(mqtt_client, mqtt_eventloop, ingest_token).await;
    });

    // ── Step 7: Remaining services + simulator manager ───────────
    let alert_service = Arc::new(buswatch_service::alert::AlertService::new(Arc::clone(
        &alert_repo,
    )));
    let message_service = Arc::new(buswatch_service::notification::MessageService::new(
        Arc::clone(&message_repo),
        Arc::clone(&alert_repo),
        Arc::clone(&vehicle_repo),
    ));
    let simulator = Arc::new(buswatch_simulator::SimulatorManager::new(
        config.mqtt.clone(),
        config.simulator.clone(),
    ));

    // ── Step 8: HTTP server ──────────────────────────────────────
    let app_state = buswatch_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        jwt_decoder,
        telemetry_service,
        alert_service,
        message_service,
        settings_service,
        user_service,
        simulator: Arc::clone(&simulator),
    };

    let app = buswatch_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("BusWatch server listening on {addr}");

    let server_token = shutdown_token.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            server_token.cancel();
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 9: Drain background tasks ───────────────────────────
    simulator.shutdown().await;
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, ingest_handle).await;

    tracing::info!("BusWatch server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
