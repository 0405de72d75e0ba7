//! Batch stage: fan a group of post ids out into per-post jobs.

use postboard_job_queue::{async_trait, JobExecutor, JobQueueClient, JobQueueError, JobRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::action::PostAction;
use crate::error::{parse_payload, JobError};
use crate::process::ProcessPostPayload;
use crate::{job_types, queues};

/// Payload for the posts.process_batch job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPostBatchPayload {
    pub post_ids: Vec<i64>,
    #[serde(default)]
    pub action: PostAction,
}

/// Executor for posts.process_batch jobs.
#[derive(Debug, Clone)]
pub struct ProcessPostBatchExecutor {
    queue: JobQueueClient,
}

impl ProcessPostBatchExecutor {
    pub fn new(queue: JobQueueClient) -> Self {
        Self { queue }
    }

    async fn run(&self, payload: ProcessPostBatchPayload) -> Result<(), JobError> {
        info!(
            posts = payload.post_ids.len(),
            action = %payload.action,
            "processing post batch"
        );

        for &post_id in &payload.post_ids {
            let job = ProcessPostPayload {
                post_id,
                action: payload.action,
            };
            let body =
                serde_json::to_value(&job).map_err(|e| JobError::InvalidPayload(e.to_string()))?;
            self.queue
                .enqueue(JobRequest::new(job_types::PROCESS_POST, body).on_queue(queues::DEFAULT))
                .await?;
        }

        info!(jobs = payload.post_ids.len(), "enqueued individual post jobs");
        Ok(())
    }
}

#[async_trait]
impl JobExecutor for ProcessPostBatchExecutor {
    fn job_type(&self) -> &str {
        job_types::PROCESS_POST_BATCH
    }

    async fn execute(&self, payload: Value) -> Result<(), JobQueueError> {
        let parsed: ProcessPostBatchPayload = parse_payload(payload)?;
        self.run(parsed).await?;
        Ok(())
    }
}
