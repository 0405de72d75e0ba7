//! Job execution errors.

use postboard_job_queue::JobQueueError;
use thiserror::Error;

/// Errors that may occur during job execution.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("post {0} not found")]
    PostNotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to enqueue follow-up job: {0}")]
    Enqueue(#[from] JobQueueError),
}

impl From<JobError> for JobQueueError {
    fn from(error: JobError) -> Self {
        match error {
            JobError::Enqueue(inner) => inner,
            other => JobQueueError::ExecutionFailed(other.to_string()),
        }
    }
}

/// Deserialize a job payload, mapping failures to [`JobError::InvalidPayload`].
pub(crate) fn parse_payload<T>(payload: serde_json::Value) -> Result<T, JobError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(payload).map_err(|e| JobError::InvalidPayload(e.to_string()))
}
