//! Storage configuration and connection management for VitalsTracker
//!
//! Two key-value backends are supported:
//! - SQLite (default), persisted to a file
//! - In-memory, lost when the process exits

use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::DatabaseError;
use crate::repository::{InMemoryStorage, KeyValueStore, DEFAULT_QUOTA_BYTES};

#[cfg(feature = "sqlite")]
use crate::repository::{SqlitePool, SqliteStorage};

/// Key under which the reading history is stored by default
pub const DEFAULT_STORAGE_KEY: &str = "healthData";

/// Supported key-value backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory, nothing survives a restart
    Memory,
    /// SQLite database (file-based)
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(DatabaseError::UnsupportedBackend(s.to_string())),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Backend holding the key-value entries
    pub backend: StorageBackend,
    /// Path to SQLite database file
    pub sqlite_path: String,
    /// Key holding the serialized reading history
    pub storage_key: String,
    /// Maximum bytes of keys plus values
    pub quota_bytes: usize,
    /// Maximum number of pooled SQLite connections
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            #[cfg(feature = "sqlite")]
            backend: StorageBackend::Sqlite,
            #[cfg(not(feature = "sqlite"))]
            backend: StorageBackend::Memory,
            sqlite_path: "data/vitals.db".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            pool_size: 4,
            timeout_seconds: 30,
        }
    }
}

impl StorageConfig {
    /// In-memory configuration, mostly useful for tests
    pub fn in_memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::default()
        }
    }

    /// Create a storage configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create a storage configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.backend,
        };

        let sqlite_path = lookup("STORAGE_SQLITE_PATH").unwrap_or(defaults.sqlite_path);
        let storage_key = lookup("STORAGE_KEY").unwrap_or(defaults.storage_key);
        if storage_key.is_empty() {
            return Err(DatabaseError::ConfigError("STORAGE_KEY must not be empty".to_string()));
        }

        let quota_bytes = parse_var(&lookup, "STORAGE_QUOTA_BYTES", defaults.quota_bytes)?;
        let pool_size = parse_var(&lookup, "STORAGE_POOL_SIZE", defaults.pool_size)?;
        let timeout_seconds = parse_var(&lookup, "STORAGE_TIMEOUT_SECONDS", defaults.timeout_seconds)?;

        if pool_size == 0 {
            return Err(DatabaseError::ConfigError("STORAGE_POOL_SIZE must be at least 1".to_string()));
        }
        if timeout_seconds == 0 {
            return Err(DatabaseError::ConfigError(
                "STORAGE_TIMEOUT_SECONDS must be at least 1".to_string(),
            ));
        }

        info!(
            "Storage configuration: backend={:?}, key={}, quota={} bytes",
            backend, storage_key, quota_bytes
        );

        Ok(StorageConfig {
            backend,
            sqlite_path,
            storage_key,
            quota_bytes,
            pool_size,
            timeout_seconds,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, DatabaseError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DatabaseError::ConfigError(format!("{} must be a number, got '{}'", name, raw))),
        None => Ok(default),
    }
}

/// Open the key-value store described by `config`
pub fn open_key_value_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, DatabaseError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(InMemoryStorage::with_quota(config.quota_bytes)))
        }
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => {
            let pool = initialize_sqlite_pool(config)?;
            Ok(Arc::new(SqliteStorage::new(pool, config.quota_bytes)))
        }
    }
}

/// Initialize a migrated SQLite connection pool.
///
/// Falls back to an in-memory SQLite database when the file cannot be opened.
#[cfg(feature = "sqlite")]
pub fn initialize_sqlite_pool(config: &StorageConfig) -> Result<SqlitePool, DatabaseError> {
    use rusqlite::OpenFlags;
    use std::fs;
    use std::path::Path;

    info!("Initializing SQLite database at: {}", config.sqlite_path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(&config.sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create directory: {}, falling back to in-memory database", e);
                return initialize_in_memory_sqlite_pool(config);
            }
        }
    }

    let manager = r2d2_sqlite::SqliteConnectionManager::file(&config.sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
        .with_init(|conn| conn.busy_timeout(Duration::from_secs(5)));

    let pool = match r2d2::Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!("Failed to create SQLite connection pool: {}, falling back to in-memory database", e);
            return initialize_in_memory_sqlite_pool(config);
        }
    };

    let conn = pool.get()?;
    super::migrations::run_sqlite_migrations(&conn)?;
    drop(conn);

    info!("SQLite connection pool created successfully");
    Ok(pool)
}

/// Initialize an in-memory SQLite database as fallback
#[cfg(feature = "sqlite")]
fn initialize_in_memory_sqlite_pool(config: &StorageConfig) -> Result<SqlitePool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    // Every connection to ":memory:" is a separate database, so keep exactly one
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(r2d2_sqlite::SqliteConnectionManager::memory())?;

    let conn = pool.get()?;
    super::migrations::run_sqlite_migrations(&conn)?;
    drop(conn);

    info!("In-memory SQLite database initialized successfully");
    Ok(pool)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage_key, "healthData");
        assert_eq!(config.quota_bytes, 5 * 1024 * 1024);
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("sqlite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!("Memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("postgres".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_from_lookup_uses_defaults_when_unset() {
        let config = StorageConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.sqlite_path, "data/vitals.db");
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("STORAGE_KEY", "vitals"),
            ("STORAGE_QUOTA_BYTES", "2048"),
        ]))
        .unwrap();

        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.storage_key, "vitals");
        assert_eq!(config.quota_bytes, 2048);
    }

    #[test]
    fn test_from_lookup_rejects_invalid_numbers() {
        let result = StorageConfig::from_lookup(lookup_from(&[("STORAGE_QUOTA_BYTES", "lots")]));
        assert!(matches!(result, Err(DatabaseError::ConfigError(_))));

        let result = StorageConfig::from_lookup(lookup_from(&[("STORAGE_POOL_SIZE", "0")]));
        assert!(matches!(result, Err(DatabaseError::ConfigError(_))));
    }

    #[test]
    fn test_sqlite_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            sqlite_path: dir.path().join("nested/vitals.db").to_string_lossy().to_string(),
            ..StorageConfig::default()
        };

        let store = open_key_value_store(&config).unwrap();
        store.set_item("healthData", "[]").unwrap();
        drop(store);

        let reopened = open_key_value_store(&config).unwrap();
        assert_eq!(reopened.get_item("healthData").unwrap().as_deref(), Some("[]"));
        assert!(reopened.describe().contains("vitals.db"));
    }
}
