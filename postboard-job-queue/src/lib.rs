//! In-process job queue used by the postboard backend.
//!
//! Jobs are identified by a type string and carry a JSON payload. Enqueued
//! jobs are handed to the registered [`JobExecutor`] for their type on a
//! tokio task, and every run is tracked in memory so it can be listed and
//! inspected afterwards. There is no persistence and no retry policy.
//!
//! # Architecture
//!
//! - [`JobQueueClient`] - Enqueues, dispatches and tracks jobs
//! - [`JobExecutor`] - Trait for implementing job handlers
//! - [`JobRun`] - A record of a job execution
//! - [`JobRequest`] - A request to enqueue a job on a named queue
//!
//! # Example
//!
//! ```rust,no_run
//! use postboard_job_queue::{async_trait, JobExecutor, JobQueueClient, JobQueueError, JobRequest};
//! use serde_json::json;
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl JobExecutor for Greeter {
//!     fn job_type(&self) -> &str {
//!         "greet"
//!     }
//!
//!     async fn execute(&self, payload: serde_json::Value) -> Result<(), JobQueueError> {
//!         println!("hello {}", payload["name"]);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = JobQueueClient::new();
//!     client.register_executor(Greeter).await;
//!
//!     let request = JobRequest::new("greet", json!({ "name": "ada" })).on_queue("default");
//!     let result = client.enqueue(request).await.unwrap();
//!     client.wait_idle().await;
//!     println!("ran job {}", result.job_id);
//! }
//! ```

mod client;
mod error;
mod executor;
mod history;
mod types;

pub use client::JobQueueClient;
pub use error::JobQueueError;
pub use executor::JobExecutor;
pub use types::{EnqueueResult, JobRequest, JobRun, JobStatus, DEFAULT_QUEUE};

pub use async_trait::async_trait;
