//! Unified error types for the Hireloop API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Repository and business rule errors
//! - `ExternalError`: Third-party HTTP service errors (auth, storage, e-mail, payments, OAuth)
//! - `AppError`: Application layer errors (mapped to HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - persistence and business rules
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from third-party HTTP services
#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - invalid credentials")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("External service error: {0}")]
    External(#[from] ExternalError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 400 for a required field that is missing or blank
    pub fn missing_field(field: &str) -> Self {
        AppError::BadRequest(format!("Missing required field: {}", field))
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Domain(DomainError::AlreadyExists(msg)) => {
                (StatusCode::CONFLICT, msg.clone())
            }
            AppError::Domain(DomainError::Conflict(msg)) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::External(e) => {
                tracing::error!("External service error: {}", e);
                match e {
                    ExternalError::Api { status, .. } if *status == 429 => (
                        StatusCode::TOO_MANY_REQUESTS,
                        "Upstream service is rate limiting requests".to_string(),
                    ),
                    ExternalError::Api { .. } => (
                        StatusCode::BAD_GATEWAY,
                        "Upstream service error".to_string(),
                    ),
                    ExternalError::NotConfigured(what) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("{} is not configured", what),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Upstream service error".to_string(),
                    ),
                }
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden(reason) => {
                tracing::debug!(reason = %reason, "Request forbidden");
                (StatusCode::FORBIDDEN, "Forbidden".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
