use std::sync::Arc;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OptionalExtension;
use tracing::{debug, error};

use super::errors::PersistenceError;
use super::kv::{check_quota, KeyValueStore};

/// Pool type used by the SQLite backend
pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

/// SQLite-backed key-value storage.
///
/// Entries live in the `kv_store` table created by the SQLite migrations.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: Arc<SqlitePool>,
    quota: usize,
}

impl SqliteStorage {
    /// Wrap a migrated connection pool
    pub fn new(pool: SqlitePool, quota: usize) -> Self {
        Self {
            pool: Arc::new(pool),
            quota,
        }
    }
}

impl KeyValueStore for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        debug!("Reading key from SQLite storage: key={}", key);

        let conn = self.pool.get()?;
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;

        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        debug!("Writing key to SQLite storage: key={}, bytes={}", key, value.len());

        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let other_bytes: i64 = tx.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM kv_store WHERE key <> ?1",
            [key],
            |row| row.get(0),
        )?;
        check_quota(other_bytes.max(0) as usize, key, value, self.quota)?;

        tx.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        tx.commit()?;

        Ok(())
    }

    fn describe(&self) -> String {
        let conn = match self.pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Failed to get SQLite connection: {}", e);
                return format!("SQLite connection error: {}", e);
            }
        };

        let location = match conn.query_row("PRAGMA database_list", [], |row| row.get::<_, String>(2)) {
            Ok(path) if path.is_empty() || path == ":memory:" => "SQLite in-memory database".to_string(),
            Ok(path) => format!("SQLite database at {}", path),
            Err(_) => "SQLite database (path unknown)".to_string(),
        };

        let state = self.pool.state();
        format!(
            "{} (connections: active={}, idle={})",
            location, state.connections, state.idle_connections
        )
    }
}
