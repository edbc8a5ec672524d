//! Storage trait definitions.
//!
//! These traits define the interface for storage backends, enabling swapping
//! between different implementations without changing business logic.

use async_trait::async_trait;

use crate::domain::{GeneratedRecord, NewRecord};
use crate::error::StorageResult;

/// Record storage operations.
///
/// Two lookup paths and one write. Identifiers are assigned by the backend,
/// start at 1 and increase monotonically.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Find the record bound to an idempotency key.
    async fn find_by_idempotency_key(&self, key: &str) -> StorageResult<Option<GeneratedRecord>>;

    /// Find the value stored under an identifier.
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<String>>;

    /// Persist a new record and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DuplicateKey` if the idempotency key is already
    /// bound to a record. The check and the insert are atomic.
    async fn create(&self, record: &NewRecord) -> StorageResult<i64>;
}

/// Combined storage trait.
#[async_trait]
pub trait Storage: RecordStorage {
    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
