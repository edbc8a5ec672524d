//! Value generation and retrieval handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, RawOptions, RecordResponse, RetrieveQuery};
use crate::error::{AppError, Result};

/// Header carrying the idempotency key.
pub const IDEMPOTENCY_HEADER: &str = "request-id";

/// Read the idempotency key; an empty value counts as absent.
fn idempotency_key(headers: &HeaderMap) -> Result<Option<String>> {
    let Some(value) = headers.get(IDEMPOTENCY_HEADER) else {
        return Ok(None);
    };

    let key = value
        .to_str()
        .map_err(|_| AppError::BadRequest("invalid idempotency key".to_string()))?;

    Ok((!key.is_empty()).then(|| key.to_string()))
}

/// Generate a value, or replay the one stored under the request's idempotency key.
///
/// The body is only decoded when no stored record matches the key.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<RecordResponse>>> {
    let key = idempotency_key(&headers)?;

    let outcome = state
        .generate_service
        .generate_with(key.as_deref(), || RawOptions::from_json(&body))
        .await?;

    Ok(Json(ApiResponse::success(outcome.into_record().into())))
}

/// Retrieve a stored value by identifier.
pub async fn retrieve(
    State(state): State<AppState>,
    Query(query): Query<RetrieveQuery>,
) -> Result<Json<ApiResponse<RecordResponse>>> {
    let id: i64 = query
        .id
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".to_string()))?;

    let record = state.generate_service.retrieve(id).await?;

    Ok(Json(ApiResponse::success(record.into())))
}
