//! Application error types.
//!
//! `AppError` is the single error type crossing handler boundaries. Each
//! variant maps to an HTTP status and a stable error code in the response
//! envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used throughout the services.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request parameters failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested experiment schema is not known to the registry.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// No database connection string is configured.
    #[error("database not configured, set DATABASE_URL")]
    NotConfigured,

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(String),

    /// Establishing a database connection failed.
    #[error("database connection failed: {0}")]
    DatabaseConnection(String),
}

impl AppError {
    /// Stable error code for client-side handling.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::SchemaNotFound(_) => "SCHEMA_NOT_FOUND",
            AppError::NotConfigured => "NOT_CONFIGURED",
            AppError::DatabaseQuery(_) => "DATABASE_QUERY_ERROR",
            AppError::DatabaseConnection(_) => "DATABASE_CONNECTION_ERROR",
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::SchemaNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseQuery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseConnection(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiResponse::err(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
