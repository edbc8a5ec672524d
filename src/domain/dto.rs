//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::GeneratedRecord;

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (null on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Query parameters for value retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveQuery {
    /// Record identifier, as sent.
    #[serde(default)]
    pub id: String,
}

/// A record as returned to callers. The idempotency key is never echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    /// Record identifier.
    pub id: i64,

    /// Generated value.
    pub value: String,
}

impl RecordResponse {
    /// Create a new record response.
    #[must_use]
    pub const fn new(id: i64, value: String) -> Self {
        Self { id, value }
    }
}

impl From<GeneratedRecord> for RecordResponse {
    fn from(record: GeneratedRecord) -> Self {
        Self::new(record.id, record.value)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version.
    pub version: String,
}

/// Readiness check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Overall readiness status.
    pub ready: bool,

    /// Individual component statuses.
    pub components: ReadyComponents,
}

/// Component readiness statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyComponents {
    /// Storage backend status.
    pub storage: bool,
}
