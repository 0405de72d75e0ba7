use async_trait::async_trait;
use serde_json::Value;

use crate::error::JobQueueError;

/// Handler for one job type.
///
/// Executors receive the raw JSON payload and parse it themselves. One that
/// holds a [`JobQueueClient`](crate::JobQueueClient) clone may enqueue
/// follow-up jobs from inside `execute`.
#[async_trait]
pub trait JobExecutor: Send + Sync {
    /// Job type string this executor is registered under.
    fn job_type(&self) -> &str;

    async fn execute(&self, payload: Value) -> Result<(), JobQueueError>;
}
