use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{http::StatusCode, response::IntoResponse, Extension};
use vitals_tracker_domain::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};

use crate::api::handlers::health::{health_check, initialize_server_start_time, AppEnvironment, HealthResponse};

// Direct implementation of a health service with a fixed storage status
struct FixedHealthService {
    storage: ComponentStatus,
}

#[async_trait]
impl HealthServiceTrait for FixedHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let status = match self.storage {
            ComponentStatus::Healthy => SystemStatus::Healthy,
            ComponentStatus::Degraded => SystemStatus::Degraded,
            ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
        };
        let mut components = HashMap::new();
        components.insert(
            "storage".to_string(),
            HealthComponent {
                status: self.storage.clone(),
                details: Some("fixed".to_string()),
            },
        );
        SystemHealth { status, components }
    }

    async fn check_storage_status(&self) -> Result<String, String> {
        match self.storage {
            ComponentStatus::Unhealthy => Err("Storage error: offline".to_string()),
            _ => Ok("fixed".to_string()),
        }
    }
}

async fn check(storage: ComponentStatus) -> (StatusCode, HealthResponse) {
    initialize_server_start_time();
    let service: Arc<dyn HealthServiceTrait> = Arc::new(FixedHealthService { storage });

    let response = health_check(Extension(service), Extension(AppEnvironment("test".to_string())))
        .await
        .into_response();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_healthy_storage() {
    let (status, body) = check(ComponentStatus::Healthy).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "ok");
    assert_eq!(body.components.storage.status, "ok");
    assert_eq!(body.environment, "test");
    assert!(body.uptime.is_some());
}

#[tokio::test]
async fn test_degraded_storage() {
    let (status, body) = check(ComponentStatus::Degraded).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.status, "degraded");
}

#[tokio::test]
async fn test_unhealthy_storage() {
    let (status, body) = check(ComponentStatus::Unhealthy).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.components.storage.status, "error");
    assert_eq!(body.components.api.status, "ok");
}
