//! Router setup and configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, values};
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Health and metrics routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(&state.config.observability.metrics_path, get(health::metrics));

    // Value routes; trailing-slash forms kept for older clients
    let value_routes = Router::new()
        .route("/generate", post(values::generate))
        .route("/generate/", post(values::generate))
        .route("/retrieve", get(values::retrieve))
        .route("/retrieve/", get(values::retrieve));

    Router::new()
        .merge(health_routes)
        .nest("/api", value_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
