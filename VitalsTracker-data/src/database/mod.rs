use thiserror::Error;

// Database modules
pub mod connection;
pub mod migrations;

// Re-export storage configuration and initialization functions
pub use connection::*;

/// Errors raised while configuring or initializing storage
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Configuration error
    #[error("Storage configuration error: {0}")]
    ConfigError(String),

    /// Unsupported storage backend
    #[error("Unsupported storage backend: {0}")]
    UnsupportedBackend(String),

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
}
