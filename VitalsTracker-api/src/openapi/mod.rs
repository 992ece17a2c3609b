use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Reading endpoints
        crate::api::handlers::readings::create_reading,
        crate::api::handlers::readings::get_history,
        crate::api::handlers::readings::classify_reading,

        // Insight endpoints
        crate::api::handlers::readings::get_dashboard,
        crate::api::handlers::readings::get_insights,
    ),
    components(
        schemas(
            // Domain entities
            vitals_tracker_domain::entities::CreateReadingRequest,
            vitals_tracker_domain::entities::NumericInput,
            vitals_tracker_domain::entities::MetricType,
            vitals_tracker_domain::entities::StatusLabel,

            // Public entities
            crate::entities::reading::PublicReading,
            crate::entities::reading::ClassifyResponse,
            crate::entities::reading::MetricCard,
            crate::entities::reading::DashboardResponse,
            crate::entities::reading::InsightsResponse,
            crate::entities::common::ErrorResponse,
            crate::entities::common::ReadingPaginatedResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "readings", description = "Recording, listing and classifying readings"),
        (name = "insights", description = "Dashboard and advisory messages")
    ),
    info(
        title = "Vitals Tracker API",
        version = "0.1.0",
        description = "API for recording vital signs and reviewing their classification",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
