use axum::{
    http::Method,
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::health::{self, AppEnvironment, HealthService};
use crate::api::handlers::readings::{self, TrackerService};
use crate::openapi::configure_swagger_routes;

/// Create the application router around the given services
pub fn create_app(tracker: TrackerService, health_service: HealthService, environment: AppEnvironment) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/readings", get(readings::get_history).post(readings::create_reading))
        .route("/classify", post(readings::classify_reading))
        .route("/dashboard", get(readings::get_dashboard))
        .route("/insights", get(readings::get_insights));

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service))
        .layer(Extension(environment));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(tracker);

    debug!("API routes nested");

    let app = add_swagger_ui(app);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    app.layer(cors).layer(TraceLayer::new_for_http())
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}
