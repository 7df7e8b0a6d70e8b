//! Unified error types for the Benefits API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence errors
//! - `AppError`: HTTP layer errors (wraps domain errors for responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::BenefitId;

/// Domain layer errors - business rules and storage failures
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Benefit not found: {0}")]
    NotFound(BenefitId),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid benefit: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("A benefit named '{0}' already exists")]
    AlreadyExists(String),

    #[error("Failed to delete benefit {0}")]
    DeleteFailed(BenefitId),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    /// Prefix storage errors with the operation that failed.
    ///
    /// Business errors pass through untouched so the HTTP layer can still
    /// classify them.
    pub fn context(self, operation: &str) -> Self {
        match self {
            DomainError::Database(msg) => DomainError::Database(format!("{}: {}", operation, msg)),
            other => other,
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid query: {}", .0.join(", "))]
    InvalidQuery(Vec<String>),

    #[error("Route {method} {path} not found")]
    RouteNotFound { method: String, path: String },
}

/// Error body nested inside the response envelope
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

/// Envelope for failed responses
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorBody,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code, message, details) = match self {
            AppError::Domain(DomainError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message, None)
            }
            AppError::Domain(DomainError::InvalidId(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, None)
            }
            AppError::Domain(DomainError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                message,
                Some(errors),
            ),
            AppError::Domain(DomainError::AlreadyExists(_)) => {
                (StatusCode::BAD_REQUEST, "DUPLICATE_NAME", message, None)
            }
            AppError::Domain(DomainError::DeleteFailed(_)) => {
                tracing::error!("{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    message,
                    None,
                )
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Failed to access the database".to_string(),
                    None,
                )
            }
            AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, None)
            }
            AppError::InvalidQuery(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                message,
                Some(errors),
            ),
            AppError::RouteNotFound { .. } => {
                (StatusCode::NOT_FOUND, "ROUTE_NOT_FOUND", message, None)
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: ErrorBody {
                code,
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}
