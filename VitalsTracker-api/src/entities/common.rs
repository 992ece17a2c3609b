use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::reading::PublicReading;

/// Error response format for the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a validation error response
    pub fn validation_error(message: &str) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a storage full error response
    pub fn storage_full(required: usize, quota: usize) -> Self {
        Self {
            error: "storage_full".to_string(),
            message: "Storage quota exceeded, the reading was not saved".to_string(),
            details: Some(serde_json::json!({ "required": required, "quota": quota })),
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }

    /// HTTP status matching the error code
    pub fn status_code(&self) -> StatusCode {
        match self.error.as_str() {
            "validation_error" => StatusCode::BAD_REQUEST,
            "storage_full" => StatusCode::INSUFFICIENT_STORAGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Paginated response format
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(ReadingPaginatedResponse = PaginatedResponse<PublicReading>)]
pub struct PaginatedResponse<T> {
    /// Total count of items matching the query
    pub total_count: usize,

    /// Current offset
    pub offset: usize,

    /// Current limit
    pub limit: usize,

    /// URL for the next page (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// URL for the previous page (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    /// Actual data items
    pub data: Vec<T>,
}
