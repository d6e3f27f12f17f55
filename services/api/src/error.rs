//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and its HTTP mapping.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use institute_core::ports::PortError;
use institute_core::validation::{FieldIssue, ValidationError};
use serde::Serialize;
use tracing::error;

/// Client-facing text for any advisor failure.
pub const RECOMMENDATION_FAILED: &str = "Failed to get course recommendation";

/// Client-facing text for a certificate miss.
pub const CERTIFICATE_NOT_FOUND: &str = "Certificate not found. Please check your details.";

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A request payload failed its schema.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// A request body that could not be read as JSON at all.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The JSON body of every error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, issues) = match self {
            ApiError::Validation(err) => {
                (StatusCode::BAD_REQUEST, err.to_string(), err.issues().to_vec())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            ApiError::Port(PortError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            // The chat contract reports relay failures as a bad request.
            ApiError::Port(PortError::Upstream(detail)) => {
                error!("Course advisor failed: {}", detail);
                (StatusCode::BAD_REQUEST, RECOMMENDATION_FAILED.to_string(), Vec::new())
            }
            other => {
                error!("Request failed: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Vec::new(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message, issues })).into_response()
    }
}
