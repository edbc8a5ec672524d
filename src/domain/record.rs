//! Persisted record types.

use serde::{Deserialize, Serialize};

/// Upper bound, in bytes, on a stored idempotency key.
pub const MAX_IDEMPOTENCY_KEY_LEN: usize = 256;

/// A value that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// The generated value.
    pub value: String,
    /// Optional caller-supplied idempotency key.
    pub idempotency_key: Option<String>,
}

impl NewRecord {
    /// Create a new unpersisted record.
    #[must_use]
    pub const fn new(value: String, idempotency_key: Option<String>) -> Self {
        Self {
            value,
            idempotency_key,
        }
    }

    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn persisted(self, id: i64) -> GeneratedRecord {
        GeneratedRecord {
            id,
            value: self.value,
            idempotency_key: self.idempotency_key,
        }
    }
}

/// A persisted value. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// The generated value.
    pub value: String,
    /// Idempotency key, if one was supplied on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Result of an idempotent generate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A new record was generated and stored.
    Created(GeneratedRecord),
    /// An existing record was returned for a known idempotency key.
    Replayed(GeneratedRecord),
}

impl GenerateOutcome {
    /// Whether this outcome came from a replay.
    #[must_use]
    pub const fn is_replayed(&self) -> bool {
        matches!(self, Self::Replayed(_))
    }

    /// Borrow the record.
    #[must_use]
    pub const fn record(&self) -> &GeneratedRecord {
        match self {
            Self::Created(record) | Self::Replayed(record) => record,
        }
    }

    /// Take the record.
    #[must_use]
    pub fn into_record(self) -> GeneratedRecord {
        match self {
            Self::Created(record) | Self::Replayed(record) => record,
        }
    }
}
