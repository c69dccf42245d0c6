//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::file_storage::StorageError;

/// API error response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl ApiError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert storage errors to application errors
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        use StorageError::{
            ConfigError, InvalidInput, NotFound, ReadFailed, S3Error, UpstreamError, WriteFailed,
        };

        match &err {
            InvalidInput(msg) => {
                tracing::warn!("Invalid input: {msg}");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_input",
                    "Invalid input provided",
                    false,
                )
            }
            NotFound(key) => {
                tracing::warn!("Object not found: {key}");
                Self::new(StatusCode::NOT_FOUND, "not_found", "Object not found", false)
            }
            UpstreamError(msg) => {
                tracing::error!("S3 upstream error: {msg}");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "upstream_error",
                    "S3 service temporarily unavailable",
                    true,
                )
            }
            WriteFailed(msg) | ReadFailed(msg) | S3Error(msg) => {
                tracing::error!("S3 error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                    true,
                )
            }
            ConfigError(msg) => {
                tracing::error!("Configuration error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                    false,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(err: StorageError) -> StatusCode {
        ApiError::from(err).status
    }

    #[test]
    fn storage_errors_map_to_expected_status_codes() {
        assert_eq!(
            status_for(StorageError::InvalidInput("empty".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(StorageError::NotFound("missing-key".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(StorageError::UpstreamError("503".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(StorageError::WriteFailed("put".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(StorageError::ReadFailed("get".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(StorageError::S3Error("list".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(StorageError::ConfigError("presign".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_errors_are_retryable_and_input_errors_are_not() {
        assert!(ApiError::from(StorageError::UpstreamError("503".to_string()))
            .inner
            .allow_retry);
        assert!(
            !ApiError::from(StorageError::InvalidInput("empty".to_string()))
                .inner
                .allow_retry
        );
    }
}
