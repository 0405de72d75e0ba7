//! Bulk stage: split an author's posts into batch jobs.

use postboard_db::{posts, DbPool};
use postboard_job_queue::{async_trait, JobExecutor, JobQueueClient, JobQueueError, JobRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::action::PostAction;
use crate::batch::ProcessPostBatchPayload;
use crate::error::{parse_payload, JobError};
use crate::{job_types, queues};

/// Payload for the posts.bulk_process job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkProcessPostsPayload {
    #[serde(alias = "user_id")]
    pub author: String,
    #[serde(default)]
    pub action: PostAction,
    /// Overrides the executor's configured batch size.
    #[serde(default)]
    pub batch_size: Option<usize>,
}

/// Executor for posts.bulk_process jobs.
///
/// Looks up every post by the author and enqueues one
/// `posts.process_batch` job per chunk of `batch_size` ids.
#[derive(Debug, Clone)]
pub struct BulkProcessPostsExecutor {
    pool: DbPool,
    queue: JobQueueClient,
    batch_size: usize,
}

impl BulkProcessPostsExecutor {
    pub fn new(pool: DbPool, queue: JobQueueClient, batch_size: usize) -> Self {
        Self {
            pool,
            queue,
            batch_size: batch_size.max(1),
        }
    }

    async fn run(&self, payload: BulkProcessPostsPayload) -> Result<usize, JobError> {
        let batch_size = match payload.batch_size {
            Some(0) => {
                return Err(JobError::InvalidPayload(
                    "batch_size must be at least 1".into(),
                ))
            }
            Some(size) => size,
            None => self.batch_size,
        };

        info!(
            author = %payload.author,
            action = %payload.action,
            batch_size,
            "starting bulk post processing"
        );

        let post_ids = posts::ids_by_author(&self.pool, &payload.author).await?;
        info!(author = %payload.author, posts = post_ids.len(), "found posts to process");

        let mut batches = 0;
        for chunk in post_ids.chunks(batch_size) {
            let batch = ProcessPostBatchPayload {
                post_ids: chunk.to_vec(),
                action: payload.action,
            };
            let body =
                serde_json::to_value(&batch).map_err(|e| JobError::InvalidPayload(e.to_string()))?;
            let request =
                JobRequest::new(job_types::PROCESS_POST_BATCH, body).on_queue(queues::DEFAULT);
            self.queue.enqueue(request).await?;
            batches += 1;
        }

        info!(author = %payload.author, batches, "enqueued batch jobs");
        Ok(batches)
    }
}

#[async_trait]
impl JobExecutor for BulkProcessPostsExecutor {
    fn job_type(&self) -> &str {
        job_types::BULK_PROCESS_POSTS
    }

    async fn execute(&self, payload: Value) -> Result<(), JobQueueError> {
        let parsed: BulkProcessPostsPayload = parse_payload(payload)?;
        self.run(parsed).await?;
        Ok(())
    }
}
