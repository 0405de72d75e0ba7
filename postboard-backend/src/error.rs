use axum::{http::StatusCode, response::IntoResponse, Json};
use postboard_job_queue::JobQueueError;
use serde_json::json;
use thiserror::Error;

use crate::validation::{self, ValidationIssue};

type SqlxError = sqlx::Error;
type SerdeJsonError = serde_json::Error;

/// Top-level API error shared by all route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("job queue error: {0}")]
    JobQueue(#[from] JobQueueError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{}", validation::summary(.0))]
    Validation(Vec<ValidationIssue>),
    #[error(transparent)]
    Sqlx(#[from] SqlxError),
    #[error(transparent)]
    SerdeJson(#[from] SerdeJsonError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::JobQueue(JobQueueError::NoExecutor(_)) => StatusCode::NOT_FOUND,
            ApiError::JobQueue(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::SerdeJson(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }

        let payload = match &self {
            ApiError::Validation(issues) => json!({
                "error": self.to_string(),
                "validation": validation::to_payload(issues),
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(payload)).into_response()
    }
}
