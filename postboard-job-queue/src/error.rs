use thiserror::Error;

/// Errors surfaced by the job queue and by executors.
#[derive(Debug, Error)]
pub enum JobQueueError {
    #[error("no executor registered for job type {0:?}")]
    NoExecutor(String),

    /// An executor reported failure; the message ends up on the run.
    #[error("job failed: {0}")]
    ExecutionFailed(String),

    #[error("executor for {job_type} panicked")]
    Panicked { job_type: String },

    /// The executor task was aborted before finishing, usually because the
    /// runtime is shutting down.
    #[error("executor for {job_type} was cancelled")]
    Cancelled { job_type: String },
}
