//! Per-post stage: apply an action to a single post.

use std::time::Duration;

use postboard_db::{posts, DbPool};
use postboard_job_queue::{async_trait, JobExecutor, JobQueueError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::action::PostAction;
use crate::error::{parse_payload, JobError};
use crate::job_types;

/// Payload for the posts.process job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPostPayload {
    pub post_id: i64,
    #[serde(default)]
    pub action: PostAction,
}

/// Executor for posts.process jobs.
///
/// `process` marks the post processed, `publish` marks it published and
/// stamps `published_at`, `archive` marks it archived. A missing post fails
/// the job.
#[derive(Debug, Clone)]
pub struct ProcessPostExecutor {
    pool: DbPool,
    work_delay: Duration,
}

impl ProcessPostExecutor {
    pub fn new(pool: DbPool, work_delay: Duration) -> Self {
        Self { pool, work_delay }
    }

    async fn run(&self, payload: ProcessPostPayload) -> Result<(), JobError> {
        let ProcessPostPayload { post_id, action } = payload;
        info!(post_id, %action, "processing post");

        let post = posts::find_by_id(&self.pool, post_id)
            .await?
            .ok_or(JobError::PostNotFound(post_id))?;

        if !self.work_delay.is_zero() {
            tokio::time::sleep(self.work_delay).await;
        }

        let now = chrono::Utc::now().to_rfc3339();
        let published_at = matches!(action, PostAction::Publish).then(|| now.clone());
        let updated = posts::update_status(
            &self.pool,
            post.id,
            action.target_status(),
            published_at.as_deref(),
            &now,
        )
        .await?;
        if !updated {
            // Deleted between the lookup and the update.
            return Err(JobError::PostNotFound(post_id));
        }

        info!(post_id, title = %post.title, status = %action.target_status(), "post updated");
        Ok(())
    }
}

#[async_trait]
impl JobExecutor for ProcessPostExecutor {
    fn job_type(&self) -> &str {
        job_types::PROCESS_POST
    }

    async fn execute(&self, payload: Value) -> Result<(), JobQueueError> {
        let parsed: ProcessPostPayload = parse_payload(payload)?;
        let post_id = parsed.post_id;
        self.run(parsed).await.map_err(|e| {
            error!(post_id, error = %e, "error processing post");
            e.into()
        })
    }
}
