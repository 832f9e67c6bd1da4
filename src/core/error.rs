//! Typed error handling for the sales dashboard
//!
//! Malformed query input and empty results are never errors: the normalizer
//! coerces bad input and an empty match is a valid page. What remains are
//! failures of the backing store and of the service itself, which surface as
//! server errors with no partial result.
//!
//! # Error Categories
//!
//! - [`StorageError`]: the backing store could not answer
//! - [`DashboardError`]: everything a handler can fail with
//! - [`RequestFailure`]: a [`DashboardError`] plus the user-facing message for the
//!   operation that failed; this is what handlers return
//!
//! # Response body
//!
//! ```json
//! { "success": false, "message": "Error fetching sales data", "error": "...", "code": "STORAGE_ERROR" }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by a sales store backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection to the backend was lost or refused
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// The backend rejected or failed the query
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// The backend did not answer in time
    #[error("{backend} timed out after {elapsed_ms} ms")]
    Timeout { backend: String, elapsed_ms: u64 },

    /// A lock guarding in-process data was poisoned
    #[error("Failed to acquire {mode} lock on {backend}")]
    LockPoisoned { backend: String, mode: &'static str },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

/// The main error type for the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    pub fn config(message: impl Into<String>) -> Self {
        DashboardError::Config {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Storage(StorageError::Unavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Storage(StorageError::Timeout { .. }) => "STORAGE_TIMEOUT",
            DashboardError::Storage(StorageError::Unavailable { .. }) => "STORAGE_UNAVAILABLE",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Config { .. } => "CONFIG_ERROR",
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Attach the user-facing message of the failed operation
    pub fn context(self, message: &'static str) -> RequestFailure {
        RequestFailure {
            message,
            error: self,
        }
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => DashboardError::Storage(storage),
            Err(other) => DashboardError::Internal(format!("{:#}", other)),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// What the request was trying to do
    pub message: String,
    /// Why it failed
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
}

/// A failed request: the operation message plus its cause
#[derive(Debug, Error)]
#[error("{message}: {error}")]
pub struct RequestFailure {
    pub message: &'static str,
    #[source]
    pub error: DashboardError,
}

impl RequestFailure {
    pub fn status_code(&self) -> StatusCode {
        self.error.status_code()
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            message: self.message.to_string(),
            error: self.error.to_string(),
            code: self.error.error_code().to_string(),
        }
    }
}

impl IntoResponse for RequestFailure {
    fn into_response(self) -> Response {
        tracing::error!(code = self.error.error_code(), error = %self.error, "{}", self.message);

        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        self.context("Request failed").into_response()
    }
}
