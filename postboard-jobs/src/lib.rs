//! Post-processing job executors for the postboard backend.
//!
//! Processing an author's posts runs as a three-stage pipeline on the
//! in-memory [`JobQueueClient`]:
//!
//! - `posts.bulk_process` (queue `bulk`) collects the author's post ids and
//!   enqueues one `posts.process_batch` job per chunk
//! - `posts.process_batch` (queue `default`) enqueues one `posts.process`
//!   job per post id
//! - `posts.process` (queue `default`) applies the action to a single post
//!
//! # Usage
//!
//! ```rust,no_run
//! use postboard_db::{create_pool, DbConnectionConfig};
//! use postboard_job_queue::JobQueueClient;
//! use postboard_jobs::{register_all_executors, PostJobSettings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = create_pool(&DbConnectionConfig::in_memory()).await.unwrap();
//!     let client = JobQueueClient::new();
//!     register_all_executors(&client, pool, PostJobSettings::default()).await;
//! }
//! ```

mod action;
mod batch;
mod bulk;
mod error;
mod process;

use std::time::Duration;

pub use action::PostAction;
pub use batch::{ProcessPostBatchExecutor, ProcessPostBatchPayload};
pub use bulk::{BulkProcessPostsExecutor, BulkProcessPostsPayload};
pub use error::JobError;
pub use process::{ProcessPostExecutor, ProcessPostPayload};

use postboard_db::DbPool;
use postboard_job_queue::JobQueueClient;

/// Default number of post ids per batch job.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Tunables shared by the post executors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostJobSettings {
    /// Chunk size used when a bulk payload doesn't set its own.
    pub batch_size: usize,
    /// Simulated work time spent on each post before it is updated.
    pub work_delay: Duration,
}

impl Default for PostJobSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            work_delay: Duration::ZERO,
        }
    }
}

/// Register all post executors with the job queue client.
pub async fn register_all_executors(
    client: &JobQueueClient,
    pool: DbPool,
    settings: PostJobSettings,
) {
    client
        .register_executor(BulkProcessPostsExecutor::new(
            pool.clone(),
            client.clone(),
            settings.batch_size,
        ))
        .await;
    client
        .register_executor(ProcessPostBatchExecutor::new(client.clone()))
        .await;
    client
        .register_executor(ProcessPostExecutor::new(pool, settings.work_delay))
        .await;
}

/// Job type constants for type-safe job references.
pub mod job_types {
    pub const BULK_PROCESS_POSTS: &str = "posts.bulk_process";
    pub const PROCESS_POST_BATCH: &str = "posts.process_batch";
    pub const PROCESS_POST: &str = "posts.process";
}

/// Queue names jobs are enqueued on.
pub mod queues {
    pub const BULK: &str = "bulk";
    pub const DEFAULT: &str = postboard_job_queue::DEFAULT_QUEUE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_db::posts::{self, NewPostRow};
    use postboard_db::{create_pool, DbConnectionConfig, PostStatus};
    use postboard_job_queue::{JobRequest, JobStatus};
    use serde_json::json;

    async fn migrated_pool() -> DbPool {
        let pool = create_pool(&DbConnectionConfig::in_memory())
            .await
            .expect("pool");
        postboard_migrations::sqlite_migrator()
            .run(&pool)
            .await
            .expect("migrations");
        pool
    }

    async fn seed(pool: &DbPool, author: &str, count: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let row = NewPostRow {
                title: format!("Post {i}"),
                content: format!("Body of post {i}"),
                author: author.to_owned(),
                status: PostStatus::Draft,
                published_at: None,
                created_at: "2025-10-01T12:00:00+00:00".to_owned(),
            };
            ids.push(posts::insert_post(pool, &row).await.expect("insert").id);
        }
        ids
    }

    async fn setup() -> (DbPool, JobQueueClient) {
        let pool = migrated_pool().await;
        let client = JobQueueClient::new();
        register_all_executors(
            &client,
            pool.clone(),
            PostJobSettings {
                batch_size: 2,
                work_delay: Duration::ZERO,
            },
        )
        .await;
        (pool, client)
    }

    #[tokio::test]
    async fn registers_every_job_type() {
        let (_pool, client) = setup().await;
        assert!(client.has_executor(job_types::BULK_PROCESS_POSTS).await);
        assert!(client.has_executor(job_types::PROCESS_POST_BATCH).await);
        assert!(client.has_executor(job_types::PROCESS_POST).await);
    }

    #[tokio::test]
    async fn bulk_pipeline_publishes_all_of_an_authors_posts() {
        let (pool, client) = setup().await;
        let mine = seed(&pool, "ada", 5).await;
        let other = seed(&pool, "grace", 1).await;

        client
            .enqueue(
                JobRequest::new(
                    job_types::BULK_PROCESS_POSTS,
                    json!({ "author": "ada", "action": "publish" }),
                )
                .on_queue(queues::BULK),
            )
            .await
            .unwrap();
        client.wait_idle().await;

        for id in mine {
            let post = posts::find_by_id(&pool, id).await.unwrap().unwrap();
            assert_eq!(post.status(), PostStatus::Published);
            assert!(post.published_at.is_some());
        }
        let untouched = posts::find_by_id(&pool, other[0]).await.unwrap().unwrap();
        assert_eq!(untouched.status(), PostStatus::Draft);

        // 5 posts in chunks of 2: one bulk run, three batches, five per-post runs.
        assert_eq!(client.count_runs(Some(job_types::BULK_PROCESS_POSTS)).await, 1);
        assert_eq!(client.count_runs(Some(job_types::PROCESS_POST_BATCH)).await, 3);
        assert_eq!(client.count_runs(Some(job_types::PROCESS_POST)).await, 5);

        let runs = client.list_runs(None, 100, 0).await;
        assert!(runs.iter().all(|r| r.status == JobStatus::Completed));
        let bulk = runs
            .iter()
            .find(|r| r.job_name == job_types::BULK_PROCESS_POSTS)
            .unwrap();
        assert_eq!(bulk.queue, queues::BULK);
        assert!(runs
            .iter()
            .filter(|r| r.job_name != job_types::BULK_PROCESS_POSTS)
            .all(|r| r.queue == queues::DEFAULT));
    }

    #[tokio::test]
    async fn payload_batch_size_overrides_setting() {
        let (pool, client) = setup().await;
        seed(&pool, "ada", 4).await;

        client
            .enqueue(JobRequest::new(
                job_types::BULK_PROCESS_POSTS,
                json!({ "author": "ada", "batch_size": 4 }),
            ))
            .await
            .unwrap();
        client.wait_idle().await;

        assert_eq!(client.count_runs(Some(job_types::PROCESS_POST_BATCH)).await, 1);
    }

    #[tokio::test]
    async fn bulk_for_author_without_posts_enqueues_nothing() {
        let (_pool, client) = setup().await;
        let run = client
            .run_job(job_types::BULK_PROCESS_POSTS, Some(json!({ "user_id": "nobody" })))
            .await
            .unwrap();
        assert_eq!(run.status, JobStatus::Completed);
        assert_eq!(client.count_runs(Some(job_types::PROCESS_POST_BATCH)).await, 0);
    }

    #[tokio::test]
    async fn process_defaults_to_processed_status() {
        let (pool, client) = setup().await;
        let ids = seed(&pool, "ada", 1).await;

        let run = client
            .run_job(job_types::PROCESS_POST, Some(json!({ "post_id": ids[0] })))
            .await
            .unwrap();
        assert_eq!(run.status, JobStatus::Completed);

        let post = posts::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
        assert_eq!(post.status(), PostStatus::Processed);
        assert!(post.published_at.is_none());
    }

    #[tokio::test]
    async fn archive_marks_post_archived() {
        let (pool, client) = setup().await;
        let ids = seed(&pool, "ada", 1).await;

        client
            .run_job(
                job_types::PROCESS_POST,
                Some(json!({ "post_id": ids[0], "action": "archive" })),
            )
            .await
            .unwrap();

        let post = posts::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
        assert!(post.is_archived());
    }

    #[tokio::test]
    async fn missing_post_fails_the_job() {
        let (_pool, client) = setup().await;
        let run = client
            .run_job(job_types::PROCESS_POST, Some(json!({ "post_id": 999 })))
            .await
            .unwrap();
        assert_eq!(run.status, JobStatus::Failed);
        assert!(run.error_message.unwrap().contains("999"));
    }

    #[tokio::test]
    async fn unknown_action_fails_the_job() {
        let (pool, client) = setup().await;
        let ids = seed(&pool, "ada", 1).await;

        let run = client
            .run_job(
                job_types::PROCESS_POST,
                Some(json!({ "post_id": ids[0], "action": "delete" })),
            )
            .await
            .unwrap();
        assert_eq!(run.status, JobStatus::Failed);

        let post = posts::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
        assert_eq!(post.status(), PostStatus::Draft);
    }

    #[tokio::test]
    async fn zero_batch_size_in_payload_is_rejected() {
        let (_pool, client) = setup().await;
        let run = client
            .run_job(
                job_types::BULK_PROCESS_POSTS,
                Some(json!({ "author": "ada", "batch_size": 0 })),
            )
            .await
            .unwrap();
        assert_eq!(run.status, JobStatus::Failed);
    }
}
