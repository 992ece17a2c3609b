// Repository module structure
pub mod errors;
mod history;
mod in_memory;
mod kv;
#[cfg(feature = "sqlite")]
mod storage;

// Re-export commonly used types
pub use errors::PersistenceError;
pub use history::{HistoryRepository, HistoryRepositoryTrait};
pub use in_memory::InMemoryStorage;
pub use kv::{KeyValueStore, DEFAULT_QUOTA_BYTES};
#[cfg(feature = "sqlite")]
pub use storage::{SqlitePool, SqliteStorage};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use history::tests;
