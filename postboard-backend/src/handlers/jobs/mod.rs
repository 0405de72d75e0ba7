//! Admin endpoints over the in-process job queue.

mod clear;
mod list;
mod run;

use chrono::{DateTime, Utc};
use postboard_job_queue::{JobRun, JobStatus};
use serde::Serialize;
use uuid::Uuid;

pub use clear::clear_runs;
pub use list::list_runs;
pub use run::run;

/// Wire form of a [`JobRun`]. The payload is left out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunView<'a> {
    id: Uuid,
    job_name: &'a str,
    queue: &'a str,
    status: JobStatus,
    enqueued_at: String,
    started_at: Option<String>,
    finished_at: Option<String>,
    error_message: Option<&'a str>,
}

fn rfc3339(at: &DateTime<Utc>) -> String {
    at.to_rfc3339()
}

impl<'a> From<&'a JobRun> for RunView<'a> {
    fn from(run: &'a JobRun) -> Self {
        Self {
            id: run.id,
            job_name: &run.job_name,
            queue: &run.queue,
            status: run.status,
            enqueued_at: rfc3339(&run.enqueued_at),
            started_at: run.started_at.as_ref().map(rfc3339),
            finished_at: run.finished_at.as_ref().map(rfc3339),
            error_message: run.error_message.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_view_uses_camel_case_and_lowercase_status() {
        let mut run = JobRun::new("posts.process", Some(json!({ "post_id": 1 })));
        run.start();
        run.fail("post 1 not found");

        let value = serde_json::to_value(RunView::from(&run)).unwrap();
        assert_eq!(value["jobName"], json!("posts.process"));
        assert_eq!(value["status"], json!("failed"));
        assert_eq!(value["errorMessage"], json!("post 1 not found"));
        assert!(value["startedAt"].is_string());
        assert!(value.get("payload").is_none());
    }
}
