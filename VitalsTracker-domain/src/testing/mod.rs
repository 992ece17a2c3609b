// Testing utilities for the domain layer
// This module is only available when the "mock" feature is enabled

use std::sync::Arc;

// Re-export useful test mocks from the data layer
pub use vitals_tracker_data::repository::tests::MockHistoryRepository;
use vitals_tracker_data::repository::{HistoryRepository, InMemoryStorage};

use crate::health::StorageHealthService;
use crate::services::tracker::HealthTrackerService;

/// Tracker and health services sharing one in-memory store
pub fn create_in_memory_services() -> (
    HealthTrackerService<HistoryRepository>,
    StorageHealthService<HistoryRepository>,
) {
    let repository = HistoryRepository::new(Arc::new(InMemoryStorage::new()));
    (
        HealthTrackerService::new(repository.clone()),
        StorageHealthService::new(repository, false),
    )
}

/// Tracker service whose storage refuses every write
pub fn create_full_storage_tracker_service() -> HealthTrackerService<MockHistoryRepository> {
    HealthTrackerService::new(MockHistoryRepository::new().with_append_failure())
}
