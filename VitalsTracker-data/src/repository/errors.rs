use std::sync::PoisonError;
use thiserror::Error;

/// Error type for history store and key-value operations
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Backend could not be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the configured quota
    #[error("Storage quota exceeded: {required} bytes required, quota is {quota} bytes")]
    QuotaExceeded {
        required: usize,
        quota: usize,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data could not be interpreted
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),

    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for PersistenceError {
    fn from(error: PoisonError<T>) -> Self {
        PersistenceError::Lock(error.to_string())
    }
}
