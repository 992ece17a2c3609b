use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};
use utoipa::IntoParams;

use vitals_tracker_data::repository::PersistenceError;
use vitals_tracker_domain::entities::{CreateReadingRequest, MetricType};
use vitals_tracker_domain::services::{HealthTrackerServiceTrait, HistoryFilter, TrackerServiceError};

use crate::entities::common::{ErrorResponse, PaginatedResponse, ReadingPaginatedResponse};
use crate::entities::reading::{ClassifyResponse, DashboardResponse, InsightsResponse, PublicReading};

/// Default page size of the history listing
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Largest page size a client may request
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Query parameters for retrieving reading history
#[derive(Debug, Deserialize, Clone, Default, IntoParams)]
pub struct HistoryQueryParams {
    /// Only readings of this metric
    #[serde(rename = "type")]
    pub reading_type: Option<MetricType>,

    /// Maximum number of results (default: 100, max: 1000)
    pub limit: Option<usize>,

    /// Pagination offset (default: 0)
    pub offset: Option<usize>,
}

/// Service type for dependency injection
pub type TrackerService = Arc<dyn HealthTrackerServiceTrait>;

/// Map a service error to the HTTP response the client sees
fn error_response(err: TrackerServiceError) -> Response {
    let response = match &err {
        TrackerServiceError::Validation(e) => {
            warn!("Rejected reading: {}", e);
            ErrorResponse::validation_error(&e.to_string())
        }
        TrackerServiceError::Persistence(PersistenceError::QuotaExceeded { required, quota }) => {
            warn!("Storage quota exceeded: {}", err);
            ErrorResponse::storage_full(*required, *quota)
        }
        TrackerServiceError::Persistence(e) => {
            error!("Storage failure: {}", e);
            ErrorResponse::internal_error()
        }
    };
    response.into_response()
}

/// Record a new reading
#[utoipa::path(
    post,
    path = "/api/v1/readings",
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading recorded", body = PublicReading),
        (status = 400, description = "Invalid reading", body = ErrorResponse),
        (status = 507, description = "Storage quota exceeded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(service, request))]
pub async fn create_reading(
    State(service): State<TrackerService>,
    Json(request): Json<CreateReadingRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Creating new {} reading", request.reading_type.label());
    let reading = service.create_reading(request).await.map_err(error_response)?;
    info!("Reading recorded at {}", reading.timestamp());
    Ok((StatusCode::CREATED, Json(PublicReading::from(&reading))))
}

/// Build the query string for a page of the history listing
fn page_url(base_url: &str, reading_type: Option<MetricType>, limit: usize, offset: usize) -> String {
    let mut query_parts = Vec::new();

    if let Some(metric) = reading_type {
        if let Ok(serde_json::Value::String(name)) = serde_json::to_value(metric) {
            query_parts.push(format!("type={}", name));
        }
    }
    query_parts.push(format!("limit={}", limit));
    query_parts.push(format!("offset={}", offset));

    format!("{}?{}", base_url, query_parts.join("&"))
}

/// Generate pagination links from the current request
fn generate_pagination_links(
    total_count: usize,
    limit: usize,
    offset: usize,
    base_url: &str,
    query_params: &HistoryQueryParams,
) -> (Option<String>, Option<String>) {
    let has_next = offset + limit < total_count;
    let has_prev = offset > 0;

    let next = has_next.then(|| page_url(base_url, query_params.reading_type, limit, offset + limit));
    let previous = has_prev.then(|| page_url(base_url, query_params.reading_type, limit, offset.saturating_sub(limit)));

    (next, previous)
}

/// Get paginated reading history, newest first
#[utoipa::path(
    get,
    path = "/api/v1/readings",
    params(
        HistoryQueryParams
    ),
    responses(
        (status = 200, description = "Reading history retrieved", body = ReadingPaginatedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(service))]
pub async fn get_history(
    State(service): State<TrackerService>,
    Query(params): Query<HistoryQueryParams>,
) -> Result<impl IntoResponse, Response> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).min(MAX_HISTORY_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let filter = HistoryFilter {
        metric: params.reading_type,
        limit: Some(limit),
        offset: Some(offset),
    };

    let (readings, total_count) = service.get_history(filter).await.map_err(error_response)?;
    let (next, previous) = generate_pagination_links(total_count, limit, offset, "/api/v1/readings", &params);

    let response = PaginatedResponse {
        total_count,
        offset,
        limit,
        next,
        previous,
        data: readings.iter().map(PublicReading::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Classify a reading without storing it
#[utoipa::path(
    post,
    path = "/api/v1/classify",
    request_body = CreateReadingRequest,
    responses(
        (status = 200, description = "Reading classified", body = ClassifyResponse),
        (status = 400, description = "Invalid reading", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(service, request))]
pub async fn classify_reading(
    State(service): State<TrackerService>,
    Json(request): Json<CreateReadingRequest>,
) -> Result<impl IntoResponse, Response> {
    let status = service.classify_request(&request).map_err(error_response)?;
    Ok((
        StatusCode::OK,
        Json(ClassifyResponse {
            reading_type: request.reading_type,
            status,
        }),
    ))
}

/// Latest value and status of every metric, with insights
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard generated", body = DashboardResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "insights"
)]
#[instrument(skip(service))]
pub async fn get_dashboard(State(service): State<TrackerService>) -> Result<impl IntoResponse, Response> {
    let dashboard = service.get_dashboard().await.map_err(error_response)?;
    Ok((StatusCode::OK, Json(DashboardResponse::from(&dashboard))))
}

/// Insight messages for the latest readings
#[utoipa::path(
    get,
    path = "/api/v1/insights",
    responses(
        (status = 200, description = "Insights generated", body = InsightsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "insights"
)]
#[instrument(skip(service))]
pub async fn get_insights(State(service): State<TrackerService>) -> Result<impl IntoResponse, Response> {
    let insights = service.get_insights().await.map_err(error_response)?;
    Ok((StatusCode::OK, Json(InsightsResponse { insights })))
}
