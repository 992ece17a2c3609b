//! Domain layer health check functionality
//! This module probes the history storage and reports system status

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::warn;
use vitals_tracker_data::repository::HistoryRepositoryTrait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component works but not as configured
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Probe the history storage.
    ///
    /// Returns a description of the backend, or an error if it cannot be read.
    async fn check_storage_status(&self) -> Result<String, String>;
}

/// Health service probing the history repository
pub struct StorageHealthService<R: HistoryRepositoryTrait> {
    repository: R,
    persistent_expected: bool,
}

impl<R: HistoryRepositoryTrait> StorageHealthService<R> {
    /// Create a health service for `repository`.
    ///
    /// With `persistent_expected`, an in-memory backend is reported as degraded.
    pub fn new(repository: R, persistent_expected: bool) -> Self {
        Self {
            repository,
            persistent_expected,
        }
    }
}

#[async_trait]
impl<R: HistoryRepositoryTrait> HealthServiceTrait for StorageHealthService<R> {
    async fn get_system_health(&self) -> SystemHealth {
        let storage = match self.check_storage_status().await {
            Ok(description) if self.persistent_expected && description.to_lowercase().contains("in-memory") => HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some(format!("Readings will not survive a restart: {}", description)),
            },
            Ok(description) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some(description),
            },
            Err(e) => HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(e),
            },
        };

        SystemHealth {
            status: overall_status(&storage.status),
            components: vec![("storage".to_string(), storage)].into_iter().collect(),
        }
    }

    async fn check_storage_status(&self) -> Result<String, String> {
        self.repository.check_connection().await.map_err(|e| {
            warn!("Storage health probe failed: {}", e);
            format!("Storage error: {}", e)
        })
    }
}

fn overall_status(component: &ComponentStatus) -> SystemStatus {
    match component {
        ComponentStatus::Healthy => SystemStatus::Healthy,
        ComponentStatus::Degraded => SystemStatus::Degraded,
        ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
    }
}
