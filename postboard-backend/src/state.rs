use std::sync::Arc;

use postboard_db::{DbPool, PostCursorSource};
use postboard_job_queue::JobQueueClient;
use postboard_pagination::PaginationConfig;

/// Shared application state passed to every route handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: Arc<DbPool>,
    pub job_queue: JobQueueClient,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Build a fully initialised state container from its constituent parts.
    pub fn new(db_pool: DbPool, job_queue: JobQueueClient, pagination: PaginationConfig) -> Self {
        Self {
            db_pool: Arc::new(db_pool),
            job_queue,
            pagination,
        }
    }

    /// Paginator source over the `posts` table.
    pub fn post_source(&self) -> PostCursorSource {
        PostCursorSource::new(DbPool::clone(&self.db_pool))
    }
}
