//! Requests, statuses and run records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Queue used when a request does not name one.
pub const DEFAULT_QUEUE: &str = "default";

fn default_queue() -> String {
    DEFAULT_QUEUE.into()
}

/// What to run, with which payload, on which queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    pub job_type: String,
    pub payload: Value,
    #[serde(default = "default_queue")]
    pub queue: String,
}

impl JobRequest {
    pub fn new(job_type: impl Into<String>, payload: Value) -> Self {
        Self {
            job_type: job_type.into(),
            payload,
            queue: default_queue(),
        }
    }

    #[must_use]
    pub fn on_queue(self, queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnqueueResult {
    pub job_id: Uuid,
}

/// Lifecycle of a run: `Pending` until an executor picks it up, then
/// `Running`, then `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution of a job, from enqueue to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRun {
    pub id: Uuid,
    pub job_name: String,
    pub queue: String,
    pub status: JobStatus,
    pub enqueued_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub payload: Option<Value>,
}

impl JobRun {
    /// Pending run with a fresh id on [`DEFAULT_QUEUE`].
    pub fn new(job_name: impl Into<String>, payload: Option<Value>) -> Self {
        Self::with_id(Uuid::new_v4(), job_name, DEFAULT_QUEUE, payload)
    }

    pub fn with_id(
        id: Uuid,
        job_name: impl Into<String>,
        queue: impl Into<String>,
        payload: Option<Value>,
    ) -> Self {
        Self {
            id,
            job_name: job_name.into(),
            queue: queue.into(),
            status: JobStatus::Pending,
            enqueued_at: Utc::now(),
            started_at: None,
            finished_at: None,
            error_message: None,
            payload,
        }
    }

    pub fn start(&mut self) {
        self.status = JobStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn complete(&mut self) {
        self.finish(JobStatus::Completed);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.finish(JobStatus::Failed);
    }

    fn finish(&mut self, status: JobStatus) {
        self.status = status;
        self.finished_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_land_on_default_queue_unless_routed() {
        let request = JobRequest::new("posts.process", json!({}));
        assert_eq!(request.queue, DEFAULT_QUEUE);
        assert_eq!(request.on_queue("bulk").queue, "bulk");

        let parsed: JobRequest =
            serde_json::from_value(json!({ "job_type": "x", "payload": null })).unwrap();
        assert_eq!(parsed.queue, DEFAULT_QUEUE);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(JobStatus::Completed).unwrap(), json!("completed"));
        assert_eq!(JobStatus::Running.to_string(), "running");
    }

    #[test]
    fn failed_run_keeps_its_message() {
        let mut run = JobRun::new("posts.process", None);
        assert_eq!(run.status, JobStatus::Pending);
        assert!(run.started_at.is_none());

        run.start();
        assert_eq!(run.status, JobStatus::Running);
        assert!(!run.status.is_terminal());

        run.fail("boom");
        assert!(run.status.is_terminal());
        assert_eq!(run.error_message.as_deref(), Some("boom"));
        assert!(run.finished_at.is_some());
    }
}
