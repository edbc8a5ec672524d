//! File-based storage backend.
//!
//! All records live in one JSON document guarded by an exclusive file lock.
//! Suitable for development and single-node deployments.
//!
//! Directory structure:
//! ```text
//! data/
//! └── records.json
//! ```

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::FileStorageConfig;
use crate::domain::{GeneratedRecord, NewRecord};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::{RecordStorage, Storage};

const RECORDS_FILE: &str = "records.json";

/// On-disk document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordsDocument {
    /// Last identifier handed out.
    last_id: i64,
    /// Records in creation order.
    records: Vec<GeneratedRecord>,
}

impl RecordsDocument {
    fn by_key(&self, key: &str) -> Option<&GeneratedRecord> {
        self.records
            .iter()
            .find(|r| r.idempotency_key.as_deref() == Some(key))
    }
}

/// File-based storage implementation.
pub struct FileStorage {
    /// Base data directory.
    base_dir: PathBuf,
    /// Path of the records document.
    records_path: PathBuf,
    /// Mutex for coordinating file operations within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Create a new file storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: &FileStorageConfig) -> StorageResult<Self> {
        let base_dir = config.data_dir.clone();

        std::fs::create_dir_all(&base_dir).map_err(|e| {
            StorageError::FileIO(format!("Failed to create directory {base_dir:?}: {e}"))
        })?;

        Ok(Self {
            records_path: base_dir.join(RECORDS_FILE),
            base_dir,
            lock: Mutex::new(()),
        })
    }

    /// Open the document file and take an exclusive lock on it.
    fn open_locked(path: &Path) -> StorageResult<File> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        file.lock_exclusive()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        Ok(file)
    }

    fn read_document(file: &mut File) -> StorageResult<RecordsDocument> {
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        if contents.trim().is_empty() {
            return Ok(RecordsDocument::default());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Read the document under lock.
    fn read_locked(path: &Path) -> StorageResult<RecordsDocument> {
        let mut file = Self::open_locked(path)?;
        let result = Self::read_document(&mut file);
        file.unlock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        result
    }

    /// Read, modify and rewrite the document under one lock.
    fn update<T, F>(path: &Path, update_fn: F) -> StorageResult<T>
    where
        F: FnOnce(&mut RecordsDocument) -> StorageResult<T>,
    {
        let mut file = Self::open_locked(path)?;

        let result = Self::read_document(&mut file).and_then(|mut document| {
            let value = update_fn(&mut document)?;

            let json = serde_json::to_string_pretty(&document)?;
            file.seek(SeekFrom::Start(0))?;
            file.set_len(0)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;

            Ok(value)
        });

        file.unlock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;

        result
    }

    /// Run file work on the blocking pool so the caller's timeout stays live
    /// while the OS lock is contended.
    async fn run_blocking<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> StorageResult<T> + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        let path = self.records_path.clone();

        tokio::task::spawn_blocking(move || op(&path))
            .await
            .map_err(|e| StorageError::FileIO(format!("File task failed: {e}")))?
    }
}

#[async_trait]
impl RecordStorage for FileStorage {
    async fn find_by_idempotency_key(&self, key: &str) -> StorageResult<Option<GeneratedRecord>> {
        let key = key.to_owned();
        self.run_blocking(move |path| {
            let document = Self::read_locked(path)?;
            Ok(document.by_key(&key).cloned())
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<String>> {
        self.run_blocking(move |path| {
            let document = Self::read_locked(path)?;
            Ok(document
                .records
                .into_iter()
                .find(|r| r.id == id)
                .map(|r| r.value))
        })
        .await
    }

    async fn create(&self, record: &NewRecord) -> StorageResult<i64> {
        let record = record.clone();

        self.run_blocking(move |path| {
            Self::update(path, |document| {
                if let Some(key) = &record.idempotency_key
                    && document.by_key(key).is_some()
                {
                    return Err(StorageError::DuplicateKey(key.clone()));
                }

                document.last_id += 1;
                let id = document.last_id;
                document.records.push(record.persisted(id));

                Ok(id)
            })
        })
        .await
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn health_check(&self) -> StorageResult<()> {
        if !self.base_dir.exists() {
            return Err(StorageError::Unavailable);
        }

        let test_file = self.base_dir.join(".health_check");
        tokio::fs::write(&test_file, b"ok")
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check failed: {e}")))?;
        tokio::fs::remove_file(&test_file)
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check cleanup failed: {e}")))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = FileStorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
        };
        let storage = FileStorage::new(&config).unwrap();
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.health_check().await.is_ok());
        assert_eq!(storage.backend_name(), "file");
    }

    #[tokio::test]
    async fn test_empty_store() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.find_by_id(1).await.unwrap().is_none());
        assert!(storage.find_by_idempotency_key("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (storage, _temp) = create_test_storage();

        let first = storage
            .create(&NewRecord::new("abc".to_string(), None))
            .await
            .unwrap();
        let second = storage
            .create(&NewRecord::new("xyz".to_string(), Some("req-1".to_string())))
            .await
            .unwrap();
        assert_eq!((first, second), (1, 2));

        assert_eq!(storage.find_by_id(1).await.unwrap().as_deref(), Some("abc"));

        let record = storage
            .find_by_idempotency_key("req-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.id, 2);
        assert_eq!(record.value, "xyz");
    }

    #[tokio::test]
    async fn test_duplicate_key_rejected() {
        let (storage, _temp) = create_test_storage();
        let record = NewRecord::new("abc".to_string(), Some("dup".to_string()));

        storage.create(&record).await.unwrap();
        let result = storage.create(&record).await;
        assert!(matches!(result, Err(StorageError::DuplicateKey(_))));

        let id = storage
            .create(&NewRecord::new("next".to_string(), None))
            .await
            .unwrap();
        assert_eq!(id, 2);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let config = FileStorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
        };

        {
            let storage = FileStorage::new(&config).unwrap();
            storage
                .create(&NewRecord::new("persisted".to_string(), Some("k".to_string())))
                .await
                .unwrap();
        }

        let storage = FileStorage::new(&config).unwrap();
        assert_eq!(
            storage.find_by_id(1).await.unwrap().as_deref(),
            Some("persisted")
        );
        let id = storage
            .create(&NewRecord::new("second".to_string(), None))
            .await
            .unwrap();
        assert_eq!(id, 2);
    }
}
