//! Idempotent generate service.
//!
//! Ties normalization, generation and storage together:
//!
//! 1. With an idempotency key, look it up. A hit is returned verbatim and
//!    the request options are never read.
//! 2. Otherwise normalize the options and generate a value. Failure here
//!    persists nothing.
//! 3. Store the value under the key and return the new record.
//!
//! There is no retry. Two concurrent calls with the same unseen key can
//! both miss in step 1; the store's uniqueness constraint rejects the second
//! insert and the caller sees an internal error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::debug;

use crate::config::StorageConfig;
use crate::domain::{
    GenerateOutcome, GeneratedRecord, GenerationKind, MAX_IDEMPOTENCY_KEY_LEN, NewRecord,
    RawOptions,
};
use crate::error::{AppError, GenerateError, Result, StorageError, StorageResult};
use crate::service::{engine, validator};
use crate::storage::traits::Storage;

/// Service for generating, persisting and retrieving values.
pub struct GenerateService {
    /// Storage backend.
    storage: Arc<dyn Storage>,
    /// Upper bound on each store call.
    store_timeout: Duration,
}

impl GenerateService {
    /// Create a new generate service.
    pub fn new(storage: Arc<dyn Storage>, config: &StorageConfig) -> Self {
        Self {
            storage,
            store_timeout: config.operation_timeout(),
        }
    }

    /// Generate a value, or replay the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad options, or an internal error if
    /// storage fails, times out, or rejects a duplicate key.
    pub async fn generate(&self, key: Option<&str>, raw: RawOptions) -> Result<GenerateOutcome> {
        self.generate_with(key, || Ok(raw)).await
    }

    /// Like [`generate`](Self::generate), but options are only decoded once
    /// the replay lookup has missed.
    ///
    /// # Errors
    ///
    /// Returns whatever `decode` returns, plus the errors of
    /// [`generate`](Self::generate).
    pub async fn generate_with<F>(&self, key: Option<&str>, decode: F) -> Result<GenerateOutcome>
    where
        F: FnOnce() -> Result<RawOptions> + Send,
    {
        if let Some(key) = key {
            if key.len() > MAX_IDEMPOTENCY_KEY_LEN {
                return Err(AppError::BadRequest("invalid idempotency key".to_string()));
            }

            if let Some(record) = self
                .bounded(self.storage.find_by_idempotency_key(key))
                .await?
            {
                debug!(id = record.id, "Replaying stored value for idempotency key");
                counter!("randgen_idempotent_replays_total").increment(1);
                return Ok(GenerateOutcome::Replayed(record));
            }
        }

        let raw = decode()?;
        let (kind, value) = Self::produce(&raw).inspect_err(|e| {
            counter!("randgen_generate_rejected_total", "reason" => rejection_reason(e))
                .increment(1);
        })?;

        let record = NewRecord::new(value, key.map(ToOwned::to_owned));
        let id = self.bounded(self.storage.create(&record)).await?;

        debug!(id, kind = %kind, keyed = key.is_some(), "Generated new value");
        counter!("randgen_values_generated_total", "kind" => kind.as_str()).increment(1);

        Ok(GenerateOutcome::Created(record.persisted(id)))
    }

    /// Look up a stored value by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this identifier, or an internal
    /// error if storage fails or times out.
    pub async fn retrieve(&self, id: i64) -> Result<GeneratedRecord> {
        let value = self
            .bounded(self.storage.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::NotFound("id".to_string()))?;

        Ok(GeneratedRecord {
            id,
            value,
            idempotency_key: None,
        })
    }

    fn produce(raw: &RawOptions) -> std::result::Result<(GenerationKind, String), GenerateError> {
        let options = validator::normalize(raw)?;
        let value = engine::generate(&options)?;
        Ok((options.kind, value))
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T>(&self, call: impl Future<Output = StorageResult<T>> + Send) -> Result<T> {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_| StorageError::Timeout(self.store_timeout))?
            .map_err(AppError::Storage)
    }
}

const fn rejection_reason(err: &GenerateError) -> &'static str {
    match err {
        GenerateError::InvalidLength => "invalid_length",
        GenerateError::InvalidCharset => "invalid_charset",
        GenerateError::InvalidType => "invalid_type",
        GenerateError::Entropy(_) => "entropy",
    }
}
