//! Error handling module.
//!
//! This module provides unified error handling with proper HTTP status code mapping
//! and standardized API error responses.

pub mod codes;

use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::{ErrorCategory, ErrorCode};

/// Message sent in place of any internal failure detail.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Errors raised while validating options or generating a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// Length outside the accepted range.
    #[error("invalid length")]
    InvalidLength,

    /// Charset missing or empty for a kind that needs one.
    #[error("invalid charset")]
    InvalidCharset,

    /// Unknown generation kind.
    #[error("invalid type")]
    InvalidType,

    /// The secure random source could not be used.
    #[error("secure random source failed: {0}")]
    Entropy(String),
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Length outside the accepted range.
    #[error("invalid length")]
    InvalidLength,

    /// Charset missing or empty for a kind that needs one.
    #[error("invalid charset")]
    InvalidCharset,

    /// Unknown generation kind.
    #[error("invalid type")]
    InvalidType,

    /// Invalid request parameters.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidLength => ErrorCode::INVALID_LENGTH,
            Self::InvalidCharset => ErrorCode::INVALID_CHARSET,
            Self::InvalidType => ErrorCode::INVALID_TYPE,
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::NotFound(_) => ErrorCode::NOT_FOUND,
            Self::Storage(_) => ErrorCode::STORAGE_ERROR,
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the caller-visible category for this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.error_code().category()
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::BadInput => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Internal | ErrorCategory::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send across the transport boundary.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self.category() {
            ErrorCategory::Internal | ErrorCategory::Unknown => INTERNAL_MESSAGE.to_string(),
            ErrorCategory::BadInput | ErrorCategory::NotFound => self.to_string(),
        }
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::InvalidLength => Self::InvalidLength,
            GenerateError::InvalidCharset => Self::InvalidCharset,
            GenerateError::InvalidType => Self::InvalidType,
            GenerateError::Entropy(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().as_i32();

        if self.category() == ErrorCategory::Internal {
            tracing::error!(
                error_code = code,
                status = %status,
                error = %self,
                "Request failed"
            );
        } else {
            tracing::debug!(
                error_code = code,
                status = %status,
                error = %self,
                "Request rejected"
            );
        }

        let body = Json(json!({
            "code": code,
            "message": self.public_message(),
            "data": null
        }));

        (status, body).into_response()
    }
}

/// Storage-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connection error.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Query failed: {0}")]
    Query(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Idempotency key already bound to another record.
    #[error("Duplicate idempotency key: {0}")]
    DuplicateKey(String),

    /// Lock acquisition failed.
    #[error("Failed to acquire lock: {0}")]
    LockFailed(String),

    /// File I/O error.
    #[error("File I/O error: {0}")]
    FileIO(String),

    /// A bounded store call did not finish in time.
    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),

    /// Backend not available.
    #[error("Storage backend unavailable")]
    Unavailable,
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::FileIO(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::DuplicateKey(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Connection(err.to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `StorageError`.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidLength.error_code(), ErrorCode::INVALID_LENGTH);
        assert_eq!(
            AppError::NotFound("id".to_string()).error_code(),
            ErrorCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("test".to_string()).error_code(),
            ErrorCode::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(AppError::InvalidCharset.category(), ErrorCategory::BadInput);
        assert_eq!(AppError::InvalidType.category(), ErrorCategory::BadInput);
        assert_eq!(
            AppError::BadRequest("invalid id".to_string()).category(),
            ErrorCategory::BadInput
        );
        assert_eq!(
            AppError::NotFound("id".to_string()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            AppError::Storage(StorageError::DuplicateKey("k".to_string())).category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidLength.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("id".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Storage(StorageError::Timeout(Duration::from_secs(5))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = AppError::Storage(StorageError::Query("no such table: vals".to_string()));
        assert_eq!(err.public_message(), "internal server error");

        let err = AppError::NotFound("id".to_string());
        assert_eq!(err.public_message(), "id not found");
    }

    #[test]
    fn test_generate_error_conversion() {
        assert!(matches!(
            AppError::from(GenerateError::InvalidLength),
            AppError::InvalidLength
        ));
        assert!(matches!(
            AppError::from(GenerateError::Entropy("boom".to_string())),
            AppError::Internal(_)
        ));
    }
}
