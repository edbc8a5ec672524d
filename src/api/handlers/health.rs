//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, HealthResponse, ReadyComponents, ReadyResponse};
use crate::error::{ErrorCode, StorageError};

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Readiness probe - checks if the service can serve requests.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<ReadyResponse>>) {
    let timeout = state.config.storage.operation_timeout();
    let check = tokio::time::timeout(timeout, state.storage.health_check())
        .await
        .unwrap_or(Err(StorageError::Timeout(timeout)));

    let storage_ok = match check {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                backend = state.storage.backend_name(),
                error = %e,
                "Storage health check failed"
            );
            false
        }
    };

    let data = ReadyResponse {
        ready: storage_ok,
        components: ReadyComponents {
            storage: storage_ok,
        },
    };

    if storage_ok {
        return (StatusCode::OK, Json(ApiResponse::success(data)));
    }

    let response = ApiResponse {
        code: ErrorCode::SERVICE_UNAVAILABLE.as_i32(),
        message: "service unavailable".to_string(),
        data: Some(data),
    };
    (StatusCode::SERVICE_UNAVAILABLE, Json(response))
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP randgen_up Whether the service is up\n");
    output.push_str("# TYPE randgen_up gauge\n");
    output.push_str("randgen_up 1\n");

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}
