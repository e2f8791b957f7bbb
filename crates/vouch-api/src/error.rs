//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from vouch-state, vouch-core, and the external
//! gateways to HTTP status codes with JSON error bodies. Upstream error
//! details are logged, never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format across the API surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// A domain precondition is unmet, e.g. missing team DID (422).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Caller does not own or administer the resource (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Conflict with current resource state, including lost
    /// compare-and-swap races (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An external gateway call failed (502). Detail is logged but not
    /// returned to the client.
    #[error("upstream gateway error: {0}")]
    Gateway(String),

    /// A required external service is not configured (503).
    #[error("service not configured: {0}")]
    NotConfigured(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Precondition(_) => (StatusCode::UNPROCESSABLE_ENTITY, "PRECONDITION_FAILED"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Gateway(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Upstream and internal detail stays in the logs.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Gateway(_) => "An upstream service call failed".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Gateway(_) => tracing::error!(error = %self, "gateway call failed"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<vouch_core::ValidationError> for AppError {
    fn from(err: vouch_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Transitions refused by a state-machine guard are unmet
/// preconditions on the resource's current status. Lost
/// compare-and-swap races are raised as [`AppError::Conflict`]
/// directly by the orchestration layer, not through this conversion.
impl From<vouch_state::TransitionError> for AppError {
    fn from(err: vouch_state::TransitionError) -> Self {
        Self::Precondition(err.to_string())
    }
}

impl From<vouch_cheqd::CheqdError> for AppError {
    fn from(err: vouch_cheqd::CheqdError) -> Self {
        Self::Gateway(err.to_string())
    }
}

impl From<vouch_assess::AssessError> for AppError {
    fn from(err: vouch_assess::AssessError) -> Self {
        Self::Gateway(err.to_string())
    }
}
