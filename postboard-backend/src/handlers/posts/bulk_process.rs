use std::sync::Arc;

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use postboard_job_queue::JobRequest;
use postboard_jobs::{job_types, queues, BulkProcessPostsPayload, PostAction};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::validation::ValidationIssue;
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkProcessRequest {
    pub author: Option<String>,
    pub action: Option<String>,
    pub batch_size: Option<i64>,
}

impl BulkProcessRequest {
    fn into_payload(self) -> Result<BulkProcessPostsPayload, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let author = self
            .author
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty());
        if author.is_none() {
            issues.push(ValidationIssue::blank("author"));
        }

        let action = match self.action.as_deref() {
            None => PostAction::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                issues.push(ValidationIssue::new(
                    "action",
                    "unknown",
                    format!("unknown action '{raw}'"),
                ));
                PostAction::default()
            }),
        };

        let batch_size = match self.batch_size {
            None => None,
            Some(n) if n < 1 => {
                issues.push(ValidationIssue::new(
                    "batchSize",
                    "out_of_range",
                    "batchSize must be at least 1",
                ));
                None
            }
            Some(n) => match usize::try_from(n) {
                Ok(size) => Some(size),
                Err(_) => {
                    issues.push(ValidationIssue::new(
                        "batchSize",
                        "out_of_range",
                        format!("batchSize must not exceed {}", usize::MAX),
                    ));
                    None
                }
            },
        };

        match author {
            Some(author) if issues.is_empty() => Ok(BulkProcessPostsPayload {
                author,
                action,
                batch_size,
            }),
            _ => Err(issues),
        }
    }
}

/// POST /posts/bulk-process
/// Enqueue a bulk job that processes every post by one author.
pub async fn bulk_process(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request: BulkProcessRequest = serde_json::from_value(body).map_err(|e| {
        ApiError::Validation(vec![ValidationIssue::new("body", "invalid_type", e.to_string())])
    })?;
    let payload = request.into_payload().map_err(ApiError::Validation)?;

    let job = JobRequest::new(job_types::BULK_PROCESS_POSTS, serde_json::to_value(&payload)?)
        .on_queue(queues::BULK);
    let enqueued = state.job_queue.enqueue(job).await?;
    info!(
        job_id = %enqueued.job_id,
        author = %payload.author,
        action = %payload.action,
        "bulk processing enqueued"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "data": {
                "jobId": enqueued.job_id,
                "jobName": job_types::BULK_PROCESS_POSTS,
                "queue": queues::BULK,
            }
        })),
    ))
}
