//! Errors the gateway renders as HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::rpc::{CallFailure, FailureKind};

/// Every variant renders as `400` with `{"message": ..., "code": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("id parameter not defined")]
    MissingId,
    #[error("id parameter is not an integer")]
    InvalidId,
    /// `Lookup` failed for any reason.
    #[error("error retrieving Cars information")]
    LookupFailed,
    #[error("Timeout was hit. Deadline exceeded.")]
    Timeout,
    /// The backend answered `BulkFetch` with an error status.
    #[error("Unexpected status error")]
    UnexpectedStatus,
    /// The backend could not be reached for `BulkFetch`.
    #[error("error retrieving Cars information")]
    RetrievalFailed,
}

impl ApiError {
    /// Machine-readable counterpart of the message.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingId => "missing_id",
            ApiError::InvalidId => "invalid_id",
            ApiError::LookupFailed => "lookup_failed",
            ApiError::Timeout => "deadline_exceeded",
            ApiError::UnexpectedStatus => "unexpected_status",
            ApiError::RetrievalFailed => "retrieval_failed",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub(crate) fn from_bulk_failure(failure: &CallFailure) -> Self {
        match failure.kind {
            FailureKind::Rejected => ApiError::UnexpectedStatus,
            FailureKind::Unavailable => ApiError::RetrievalFailed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "message": self.to_string(), "code": self.code() });
        (self.status_code(), Json(body)).into_response()
    }
}
