//! Error types and API response mapping

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standardized error codes for the dashboard API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request input (400)
    ValidationError,
    /// Upstream rejected the configured credentials (401)
    InvalidCredential,
    /// Resource not found (404)
    NotFound,
    /// Order-fetch gateway or ad platform unreachable / non-2xx (502)
    GatewayUnavailable,
    /// Upstream returned 2xx but the payload is structurally invalid (502)
    MalformedResponse,
    /// Upstream request exceeded the configured timeout (504)
    GatewayTimeout,
    /// Unexpected internal failure (500)
    InternalError,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Invalid request",
            ErrorCode::InvalidCredential => "Invalid upstream credentials",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::GatewayUnavailable => "Upstream gateway unavailable",
            ErrorCode::MalformedResponse => "Upstream returned a malformed response",
            ErrorCode::GatewayTimeout => "Upstream request timed out",
            ErrorCode::InternalError => "Internal server error",
        }
    }

    /// HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidCredential => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::GatewayUnavailable | ErrorCode::MalformedResponse => StatusCode::BAD_GATEWAY,
            ErrorCode::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application error with structured error code and message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    // ==================== Convenience constructors ====================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, message)
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!(code = ?self.code, "{}", self.message);
        }
        let body = ErrorBody {
            code: self.code,
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;
