//! SQLite storage backend.
//!
//! Records live in the `vals` table; the unique index on `request_id`
//! enforces idempotency-key uniqueness across non-null keys.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::SqliteStorageConfig;
use crate::domain::{GeneratedRecord, NewRecord};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::{RecordStorage, Storage};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vals (
    id INTEGER PRIMARY KEY,
    val VARCHAR(256) NOT NULL,
    request_id VARCHAR(256) UNIQUE
);
CREATE INDEX IF NOT EXISTS idx_req_id ON vals(request_id);
";

/// SQLite-backed record storage.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if needed) the database and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn connect(config: &SqliteStorageConfig) -> StorageResult<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::FileIO(format!("Failed to create directory {parent:?}: {e}"))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordStorage for SqliteStorage {
    async fn find_by_idempotency_key(&self, key: &str) -> StorageResult<Option<GeneratedRecord>> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, val FROM vals WHERE request_id = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, value)| GeneratedRecord {
            id,
            value,
            idempotency_key: Some(key.to_string()),
        }))
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT val FROM vals WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn create(&self, record: &NewRecord) -> StorageResult<i64> {
        let id =
            sqlx::query_scalar::<_, i64>("INSERT INTO vals (val, request_id) VALUES (?, ?) RETURNING id")
                .bind(&record.value)
                .bind(record.idempotency_key.as_deref())
                .fetch_one(&self.pool)
                .await?;

        Ok(id)
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_storage() -> (SqliteStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = SqliteStorageConfig {
            path: temp_dir.path().join("nested").join("data.db"),
            ..Default::default()
        };
        let storage = SqliteStorage::connect(&config).await.unwrap();
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (storage, _temp) = create_test_storage().await;
        assert!(storage.health_check().await.is_ok());
        assert_eq!(storage.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (storage, _temp) = create_test_storage().await;

        let first = storage
            .create(&NewRecord::new("4821".to_string(), None))
            .await
            .unwrap();
        let second = storage
            .create(&NewRecord::new("AbCd".to_string(), Some("req".to_string())))
            .await
            .unwrap();
        assert!(second > first);

        assert_eq!(
            storage.find_by_id(first).await.unwrap().as_deref(),
            Some("4821")
        );
        assert!(storage.find_by_id(second + 100).await.unwrap().is_none());

        let record = storage
            .find_by_idempotency_key("req")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.id, second);
        assert_eq!(record.value, "AbCd");
        assert!(storage.find_by_idempotency_key("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_null_keys_do_not_collide() {
        let (storage, _temp) = create_test_storage().await;

        for value in ["a", "b", "c"] {
            storage
                .create(&NewRecord::new(value.to_string(), None))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_duplicate_key_rejected() {
        let (storage, _temp) = create_test_storage().await;
        let record = NewRecord::new("x".to_string(), Some("dup".to_string()));

        storage.create(&record).await.unwrap();
        let result = storage.create(&record).await;
        assert!(matches!(result, Err(StorageError::DuplicateKey(_))));
    }
}
