//! # HTTP API Errors
//!
//! Error types for the HTTP boundary. Every failure maps to a status code
//! and a JSON body carrying a stable error code, so callers can branch on
//! `error` without parsing the human-readable message. A failing request
//! only ever affects itself.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body did not bind as the expected JSON shape
    #[error("Request body did not bind: {0}")]
    BindFailure(String),

    /// Page id is not a valid store id
    #[error("Invalid page id: {0}")]
    InvalidId(String),

    /// No page exists under the given id
    #[error("No page with id: {0}")]
    PageNotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store rejected the insert or update
    #[error("Write failed: {0}")]
    WriteFailure(String),

    /// A stored document does not decode into the page shape
    #[error("Failed to decode stored page: {0}")]
    DecodeFailure(String),

    /// Store cannot be reached or did not answer in time
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::BindFailure(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            ApiError::PageNotFound(_) => StatusCode::NOT_FOUND,

            // 5xx
            ApiError::WriteFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DecodeFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BindFailure(_) => "BIND_FAILURE",
            ApiError::InvalidId(_) => "INVALID_ID",
            ApiError::PageNotFound(_) => "PAGE_NOT_FOUND",
            ApiError::WriteFailure(_) => "WRITE_FAILURE",
            ApiError::DecodeFailure(_) => "DECODE_FAILURE",
            ApiError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidId(id) => ApiError::InvalidId(id),
            StoreError::NotFound(id) => ApiError::PageNotFound(id),
            StoreError::WriteFailure(message) => ApiError::WriteFailure(message),
            StoreError::DecodeFailure(message) => ApiError::DecodeFailure(message),
            StoreError::Unavailable(message) => ApiError::StoreUnavailable(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BindFailure(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            error: err.error_code().to_string(),
            code: err.status_code().as_u16(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
