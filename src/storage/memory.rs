//! In-process storage backend.
//!
//! Records live only as long as the process. Suitable for tests and
//! throwaway deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{GeneratedRecord, NewRecord};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::{RecordStorage, Storage};

#[derive(Default)]
struct Records {
    next_id: i64,
    by_id: HashMap<i64, GeneratedRecord>,
    by_key: HashMap<String, i64>,
}

/// Memory-backed record storage.
#[derive(Default)]
pub struct MemoryStorage {
    records: Mutex<Records>,
}

impl MemoryStorage {
    /// Create an empty memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().by_id.len()
    }

    /// Whether no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStorage for MemoryStorage {
    async fn find_by_idempotency_key(&self, key: &str) -> StorageResult<Option<GeneratedRecord>> {
        let records = self.records.lock();
        Ok(records
            .by_key
            .get(key)
            .and_then(|id| records.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<String>> {
        let records = self.records.lock();
        Ok(records.by_id.get(&id).map(|r| r.value.clone()))
    }

    async fn create(&self, record: &NewRecord) -> StorageResult<i64> {
        let mut records = self.records.lock();

        if let Some(key) = &record.idempotency_key
            && records.by_key.contains_key(key)
        {
            return Err(StorageError::DuplicateKey(key.clone()));
        }

        records.next_id += 1;
        let id = records.next_id;

        if let Some(key) = &record.idempotency_key {
            records.by_key.insert(key.clone(), id);
        }
        records.by_id.insert(id, record.clone().persisted(id));

        Ok(id)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
