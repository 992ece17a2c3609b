pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tracing::info;
use vitals_tracker_data::database::{DatabaseError, StorageBackend};
use vitals_tracker_domain::health::StorageHealthService;
use vitals_tracker_domain::services::create_default_tracker_service;

use crate::config::ServerConfig;
use handlers::health::AppEnvironment;

pub use routes::create_app;

/// Create the application router, opening the storage described by `config`
pub fn create_application(config: &ServerConfig) -> Result<Router, DatabaseError> {
    let tracker = create_default_tracker_service(&config.storage)?;
    let persistent_expected = config.storage.backend != StorageBackend::Memory;
    let health_service = StorageHealthService::new(tracker.repository().clone(), persistent_expected);

    info!("Application services created for the {} environment", config.environment);

    Ok(create_app(
        Arc::new(tracker),
        Arc::new(health_service),
        AppEnvironment(config.environment.clone()),
    ))
}
