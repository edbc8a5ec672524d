//! Error code constants.
//!
//! Error codes are organized by category:
//! - 3xxx: Bad input (caller faults)
//! - 4xxx: Not found
//! - 5xxx: Internal/System errors

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    // ===== Bad Input Errors (3xxx) =====

    /// Undecodable request (body, identifier, idempotency key).
    pub const BAD_REQUEST: Self = Self(3001);

    /// Requested length outside the accepted range.
    pub const INVALID_LENGTH: Self = Self(3002);

    /// Charset missing or empty for a kind that needs one.
    pub const INVALID_CHARSET: Self = Self(3003);

    /// Unknown generation kind.
    pub const INVALID_TYPE: Self = Self(3004);

    // ===== Not Found Errors (4xxx) =====

    /// Resource not found.
    pub const NOT_FOUND: Self = Self(4001);

    // ===== Internal/System Errors (5xxx) =====

    /// Storage backend error.
    pub const STORAGE_ERROR: Self = Self(5001);

    /// Internal server error.
    pub const INTERNAL_ERROR: Self = Self(5002);

    /// Service unavailable.
    pub const SERVICE_UNAVAILABLE: Self = Self(5003);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Get the category of this error code.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.0 {
            3000..=3999 => ErrorCategory::BadInput,
            4000..=4999 => ErrorCategory::NotFound,
            5000..=5999 => ErrorCategory::Internal,
            _ => ErrorCategory::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// Caller-visible error category.
///
/// The transport maps categories onto status codes; the service only
/// decides which category a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent something unusable (3xxx).
    BadInput,
    /// The requested identifier or key does not exist (4xxx).
    NotFound,
    /// Anything unexpected: storage, timeouts, entropy (5xxx).
    Internal,
    /// Unknown category.
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadInput => write!(f, "bad-input"),
            Self::NotFound => write!(f, "not-found"),
            Self::Internal => write!(f, "internal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
