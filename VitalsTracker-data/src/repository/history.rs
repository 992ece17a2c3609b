use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::errors::PersistenceError;
use super::kv::KeyValueStore;
use crate::database::DEFAULT_STORAGE_KEY;
use crate::models::reading::StoredReading;

/// Repository trait for the reading history
#[async_trait]
pub trait HistoryRepositoryTrait: Send + Sync {
    /// Append a reading to the end of the history
    async fn append(&self, reading: StoredReading) -> Result<(), PersistenceError>;

    /// Load every stored reading, in append order
    async fn load_all(&self) -> Result<Vec<StoredReading>, PersistenceError>;

    /// Probe the backend and describe it
    async fn check_connection(&self) -> Result<String, PersistenceError>;
}

/// History store keeping every reading as one JSON array under a single key
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
    /// Serializes the load-modify-store cycle of appends
    append_lock: Arc<Mutex<()>>,
}

impl HistoryRepository {
    /// Create a repository over `store` using the default key
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create a repository over `store` using a custom key
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    fn read_history(&self) -> Result<Vec<StoredReading>, PersistenceError> {
        match self.store.get_item(&self.key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                error!("Stored history under '{}' is not a valid reading array: {}", self.key, e);
                PersistenceError::Corrupt(format!("history under '{}': {}", self.key, e))
            }),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl HistoryRepositoryTrait for HistoryRepository {
    async fn append(&self, reading: StoredReading) -> Result<(), PersistenceError> {
        let _guard = self.append_lock.lock()?;

        let mut readings = self.read_history()?;
        readings.push(reading);

        let raw = serde_json::to_string(&readings)?;
        if let Err(e) = self.store.set_item(&self.key, &raw) {
            warn!("Failed to persist reading history: {}", e);
            return Err(e);
        }

        debug!("Appended reading, history now holds {} readings", readings.len());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<StoredReading>, PersistenceError> {
        let readings = self.read_history()?;
        debug!("Loaded {} readings from history", readings.len());
        Ok(readings)
    }

    async fn check_connection(&self) -> Result<String, PersistenceError> {
        self.store.get_item(&self.key)?;
        Ok(self.store.describe())
    }
}

/// Mock history repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;

    /// Mock implementation of the history repository with switchable failures
    #[derive(Debug, Default)]
    pub struct MockHistoryRepository {
        readings: Mutex<Vec<StoredReading>>,
        fail_appends: bool,
        fail_loads: bool,
    }

    impl MockHistoryRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository with predefined readings
        pub fn with_readings(readings: Vec<StoredReading>) -> Self {
            Self {
                readings: Mutex::new(readings),
                ..Self::default()
            }
        }

        /// Make every append fail as if storage were full
        pub fn with_append_failure(mut self) -> Self {
            self.fail_appends = true;
            self
        }

        /// Make every load fail as if storage were unreachable
        pub fn with_load_failure(mut self) -> Self {
            self.fail_loads = true;
            self
        }
    }

    #[async_trait]
    impl HistoryRepositoryTrait for MockHistoryRepository {
        async fn append(&self, reading: StoredReading) -> Result<(), PersistenceError> {
            if self.fail_appends {
                return Err(PersistenceError::QuotaExceeded { required: 1, quota: 0 });
            }
            self.readings.lock()?.push(reading);
            Ok(())
        }

        async fn load_all(&self) -> Result<Vec<StoredReading>, PersistenceError> {
            if self.fail_loads {
                return Err(PersistenceError::Unavailable("mock storage is offline".to_string()));
            }
            Ok(self.readings.lock()?.clone())
        }

        async fn check_connection(&self) -> Result<String, PersistenceError> {
            if self.fail_loads {
                return Err(PersistenceError::Unavailable("mock storage is offline".to_string()));
            }
            Ok("Mock history repository".to_string())
        }
    }

    #[cfg(test)]
    mod history_repository_tests {
        use super::*;
        use crate::models::reading::StoredReadingType;
        use crate::repository::in_memory::InMemoryStorage;

        fn heart_rate(timestamp: &str, value: f64) -> StoredReading {
            StoredReading {
                reading_type: StoredReadingType::HeartRate,
                timestamp: timestamp.to_string(),
                notes: None,
                systolic: None,
                diastolic: None,
                value: Some(value),
            }
        }

        #[tokio::test]
        async fn test_empty_store_loads_empty_history() {
            let repo = HistoryRepository::new(Arc::new(InMemoryStorage::new()));
            assert!(repo.load_all().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_append_preserves_order() {
            let repo = HistoryRepository::new(Arc::new(InMemoryStorage::new()));
            repo.append(heart_rate("2024-05-01T08:00:00Z", 72.0)).await.unwrap();
            repo.append(heart_rate("2024-05-01T07:00:00Z", 110.0)).await.unwrap();

            let readings = repo.load_all().await.unwrap();
            assert_eq!(readings.len(), 2);
            assert_eq!(readings[0].value, Some(72.0));
            assert_eq!(readings[1].value, Some(110.0));
        }

        #[tokio::test]
        async fn test_history_is_stored_under_key_as_json_array() {
            let storage = Arc::new(InMemoryStorage::new());
            let repo = HistoryRepository::new(storage.clone());
            repo.append(heart_rate("2024-05-01T08:00:00Z", 72.5)).await.unwrap();

            let raw = storage.get_item("healthData").unwrap().unwrap();
            assert_eq!(
                raw,
                r#"[{"type":"heartRate","timestamp":"2024-05-01T08:00:00Z","value":72.5}]"#
            );
        }

        #[tokio::test]
        async fn test_quota_failure_leaves_history_unchanged() {
            let storage = Arc::new(InMemoryStorage::with_quota(100));
            let repo = HistoryRepository::new(storage);
            repo.append(heart_rate("2024-05-01T08:00:00Z", 72.0)).await.unwrap();

            let result = repo.append(heart_rate("2024-05-01T09:00:00Z", 80.0)).await;
            assert!(matches!(result, Err(PersistenceError::QuotaExceeded { .. })));
            assert_eq!(repo.load_all().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_corrupt_history_is_reported() {
            let storage = Arc::new(InMemoryStorage::new());
            storage.set_item("healthData", "{not json").unwrap();
            let repo = HistoryRepository::new(storage);

            let result = repo.load_all().await;
            assert!(matches!(result, Err(PersistenceError::Corrupt(_))));
        }

        #[tokio::test]
        async fn test_custom_key_is_isolated() {
            let storage = Arc::new(InMemoryStorage::new());
            let primary = HistoryRepository::new(storage.clone());
            let secondary = HistoryRepository::with_key(storage, "otherProfile");

            primary.append(heart_rate("2024-05-01T08:00:00Z", 72.0)).await.unwrap();
            assert!(secondary.load_all().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_mock_failures() {
            let repo = MockHistoryRepository::new().with_append_failure();
            assert!(repo.append(heart_rate("2024-05-01T08:00:00Z", 72.0)).await.is_err());

            let repo = MockHistoryRepository::with_readings(vec![heart_rate("2024-05-01T08:00:00Z", 72.0)])
                .with_load_failure();
            assert!(repo.load_all().await.is_err());
            assert!(repo.check_connection().await.is_err());
        }
    }
}
