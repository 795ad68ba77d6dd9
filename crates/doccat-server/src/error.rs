//! Axum-specific error types and mappings.
//!
//! This module maps [`doccat::Error`] to HTTP status codes and response
//! bodies. Merge endpoints answer with a [`MergeResult`] body on both
//! success and failure; every other endpoint reports failures as
//! `{"error": ..., "status": ...}`.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use doccat::{MergeReport, MergeResult};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Known route, unsupported method.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            HttpError::NotFound(msg)
            | HttpError::BadRequest(msg)
            | HttpError::MethodNotAllowed(msg)
            | HttpError::Internal(msg) => msg,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message().to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<doccat::Error> for HttpError {
    fn from(err: doccat::Error) -> Self {
        if err.is_input_error() {
            HttpError::BadRequest(err.to_string())
        } else {
            tracing::error!("Request failed: {err}");
            HttpError::Internal(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for HttpError {
    fn from(err: tokio::task::JoinError) -> Self {
        HttpError::Internal(format!("Worker task failed: {err}"))
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::BadRequest(format!("Invalid JSON request: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        HttpError::BadRequest(format!("Invalid multipart request: {}", err.body_text()))
    }
}

/// Fallback for known routes hit with an unsupported method.
pub(crate) async fn method_not_allowed(method: Method) -> HttpError {
    HttpError::MethodNotAllowed(format!("Method {method} is not supported on this route"))
}

/// Response of the merge endpoints.
#[derive(Debug)]
pub struct MergeResponse {
    status: StatusCode,
    result: MergeResult,
}

impl MergeResponse {
    /// Status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body of the response.
    pub fn result(&self) -> &MergeResult {
        &self.result
    }
}

impl From<Result<MergeReport, HttpError>> for MergeResponse {
    fn from(outcome: Result<MergeReport, HttpError>) -> Self {
        match outcome {
            Ok(report) => Self {
                status: StatusCode::OK,
                result: report.into(),
            },
            Err(err) => Self {
                status: err.status(),
                result: MergeResult::failure_message(err.message()),
            },
        }
    }
}

impl IntoResponse for MergeResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.result)).into_response()
    }
}
