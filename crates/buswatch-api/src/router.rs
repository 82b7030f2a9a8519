//! Route definitions for the BusWatch HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`; the health
//! check stays at the root. The router receives `AppState` and passes it to
//! all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(bus_routes())
        .merge(alert_routes())
        .merge(config_routes())
        .merge(simulator_routes())
        .merge(message_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, me, password change, user administration
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/auth/change-password",
            post(handlers::auth::change_password),
        )
        .route("/auth/users", get(handlers::auth::list_users))
        .route("/auth/users", post(handlers::auth::create_user))
        .route("/auth/users/{id}", delete(handlers::auth::delete_user))
}

/// Latest snapshot and history
fn bus_routes() -> Router<AppState> {
    Router::new()
        .route("/buses", get(handlers::buses::list_buses))
        .route("/buses/{id}/history", get(handlers::buses::bus_history))
}

/// Recent alerts
fn alert_routes() -> Router<AppState> {
    Router::new().route("/alerts", get(handlers::alerts::recent_alerts))
}

/// Runtime settings singleton
fn config_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(handlers::config::read_config))
        .route("/config", put(handlers::config::update_config))
}

/// Simulator fleet control
fn simulator_routes() -> Router<AppState> {
    Router::new()
        .route("/simulators/status", get(handlers::simulators::status))
        .route("/simulators/start", post(handlers::simulators::start))
        .route("/simulators/stop", post(handlers::simulators::stop))
        .route(
            "/simulators/bus/{id}/start",
            post(handlers::simulators::start_bus),
        )
        .route(
            "/simulators/bus/{id}/stop",
            post(handlers::simulators::stop_bus),
        )
}

/// Driver messaging
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages/send", post(handlers::messages::send_message))
        .route("/messages", get(handlers::messages::list_messages))
        .route(
            "/messages/templates",
            get(handlers::messages::get_templates),
        )
        .route("/messages/{id}", get(handlers::messages::get_message))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
