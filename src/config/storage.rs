//! Storage configuration.

use std::path::PathBuf;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;

/// Storage backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local storage (tests, throwaway runs).
    Memory,
    /// JSON document storage (development/single-node).
    File,
    /// SQLite database.
    #[default]
    Sqlite,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Upper bound on each store call, in milliseconds.
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// File storage configuration.
    #[serde(default)]
    pub file: FileStorageConfig,

    /// SQLite storage configuration.
    #[serde(default)]
    pub sqlite: SqliteStorageConfig,
}

const fn default_operation_timeout_ms() -> u64 {
    5000
}

impl StorageConfig {
    /// Upper bound on each store call.
    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Validate the storage configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration fields are missing for the selected backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.operation_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "storage.operation_timeout_ms cannot be 0".to_string(),
            ));
        }

        match self.backend {
            StorageBackend::Memory | StorageBackend::File => Ok(()),
            StorageBackend::Sqlite => {
                if self.sqlite.path.as_os_str().is_empty() {
                    return Err(ConfigError::Message(
                        "storage.sqlite.path cannot be empty".to_string(),
                    ));
                }
                if self.sqlite.max_connections == 0 {
                    return Err(ConfigError::Message(
                        "storage.sqlite.max_connections cannot be 0".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            operation_timeout_ms: default_operation_timeout_ms(),
            file: FileStorageConfig::default(),
            sqlite: SqliteStorageConfig::default(),
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FileStorageConfig {
    /// Directory for storing data files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStorageConfig {
    /// Database file path; created if missing.
    #[serde(default = "default_sqlite_path")]
    pub path: PathBuf,

    /// Connection pool maximum size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("./data/data.db")
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_connect_timeout() -> u64 {
    5
}

impl Default for SqliteStorageConfig {
    fn default() -> Self {
        Self {
            path: default_sqlite_path(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_display() {
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
        assert_eq!(StorageBackend::File.to_string(), "file");
        assert_eq!(StorageBackend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_storage_config_validation() {
        let config = StorageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.operation_timeout(), Duration::from_secs(5));

        let mut config = StorageConfig::default();
        config.operation_timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = StorageConfig::default();
        config.sqlite.max_connections = 0;
        assert!(config.validate().is_err());

        config.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }
}
