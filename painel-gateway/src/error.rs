//! Gateway client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failure (connect, body, protocol)
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Upstream rejected the configured credentials (401)
    #[error("Invalid upstream credentials")]
    Unauthorized,

    /// Upstream returned 2xx but the body is structurally invalid
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Upstream returned a non-2xx status that is not retryable
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else {
            ClientError::Http(err)
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized => AppError::new(ErrorCode::InvalidCredential),
            ClientError::Timeout(msg) => AppError::with_message(ErrorCode::GatewayTimeout, msg),
            ClientError::InvalidResponse(msg) => {
                AppError::with_message(ErrorCode::MalformedResponse, msg)
            }
            ClientError::Http(e) => {
                AppError::with_message(ErrorCode::GatewayUnavailable, e.to_string())
            }
            ClientError::Upstream { status, body } => AppError::with_message(
                ErrorCode::GatewayUnavailable,
                format!("upstream returned {status}: {body}"),
            ),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
