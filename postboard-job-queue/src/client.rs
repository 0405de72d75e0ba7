//! Job queue client: registration, dispatch and run tracking.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinError;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::JobQueueError;
use crate::executor::JobExecutor;
use crate::history::RunHistory;
use crate::types::{EnqueueResult, JobRequest, JobRun};

/// Maximum number of job runs to keep in memory.
const MAX_JOB_RUNS: usize = 1000;

type ExecutorMap = HashMap<String, Arc<dyn JobExecutor>>;

/// Counts dispatched jobs that have not finished and wakes
/// [`JobQueueClient::wait_idle`] callers when the count drops to zero.
#[derive(Debug, Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

/// Decrements [`InFlight`] when dropped, so a panicking executor task still
/// releases its slot.
struct InFlightGuard(Arc<InFlight>);

impl InFlightGuard {
    fn acquire(in_flight: &Arc<InFlight>) -> Self {
        in_flight.count.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(in_flight))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Handle for enqueuing jobs and inspecting their runs. Cheap to clone; all
/// clones share the same executors and history.
///
/// A job whose type has a registered executor is dispatched onto the tokio
/// runtime as soon as it is enqueued. Jobs without one stay pending. Failed
/// jobs are recorded and never retried.
#[derive(Clone)]
pub struct JobQueueClient {
    history: Arc<RwLock<RunHistory>>,
    executors: Arc<RwLock<ExecutorMap>>,
    in_flight: Arc<InFlight>,
}

impl fmt::Debug for JobQueueClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobQueueClient")
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}

impl Default for JobQueueClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JobQueueClient {
    pub fn new() -> Self {
        Self {
            history: Arc::new(RwLock::new(RunHistory::with_capacity(MAX_JOB_RUNS))),
            executors: Arc::new(RwLock::new(HashMap::new())),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Register `executor` for its job type, replacing any previous one.
    pub async fn register_executor<E: JobExecutor + 'static>(&self, executor: E) {
        let job_type = executor.job_type().to_owned();
        self.executors
            .write()
            .await
            .insert(job_type, Arc::new(executor));
    }

    pub async fn has_executor(&self, job_type: &str) -> bool {
        self.executors.read().await.contains_key(job_type)
    }

    async fn executor_for(&self, job_type: &str) -> Option<Arc<dyn JobExecutor>> {
        self.executors.read().await.get(job_type).cloned()
    }

    /// Record a pending run and, if an executor is registered for the job
    /// type, start it on a new tokio task.
    pub async fn enqueue(&self, request: JobRequest) -> Result<EnqueueResult, JobQueueError> {
        let JobRequest {
            job_type,
            payload,
            queue,
        } = request;
        let job_id = Uuid::new_v4();

        self.history.write().await.record(JobRun::with_id(
            job_id,
            &job_type,
            &queue,
            Some(payload.clone()),
        ));

        let Some(executor) = self.executor_for(&job_type).await else {
            warn!(%job_id, %job_type, %queue, "no executor registered; job left pending");
            return Ok(EnqueueResult { job_id });
        };

        debug!(%job_id, %job_type, %queue, "dispatching job");
        let guard = InFlightGuard::acquire(&self.in_flight);
        let client = self.clone();
        tokio::spawn(async move {
            let _guard = guard;
            client.dispatch(job_id, executor, payload).await;
        });

        Ok(EnqueueResult { job_id })
    }

    async fn dispatch(&self, job_id: Uuid, executor: Arc<dyn JobExecutor>, payload: Value) {
        self.history.write().await.update(job_id, JobRun::start);

        let job_type = executor.job_type().to_owned();
        let joined = tokio::spawn(async move { executor.execute(payload).await }).await;
        let outcome = task_outcome(&job_type, joined);

        let mut history = self.history.write().await;
        match outcome {
            Ok(()) => {
                history.update(job_id, JobRun::complete);
                debug!(%job_id, %job_type, "job completed");
            }
            Err(e) => {
                warn!(%job_id, %job_type, error = %e, "job failed");
                history.update(job_id, |run| run.fail(e.to_string()));
            }
        }
    }

    /// Resolve once no dispatched job is running, including jobs that
    /// running jobs enqueue while this waits.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.in_flight.idle.notified();
            if self.in_flight() == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Number of dispatched jobs that have not finished yet.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::SeqCst)
    }

    /// Execute a job on the caller's task and record the finished run.
    ///
    /// A missing payload is passed to the executor as `null`. Executor
    /// failures end up on the returned run rather than as an `Err`.
    pub async fn run_job(
        &self,
        job_name: impl Into<String>,
        payload: Option<Value>,
    ) -> Result<JobRun, JobQueueError> {
        let job_name = job_name.into();
        let executor = self
            .executor_for(&job_name)
            .await
            .ok_or_else(|| JobQueueError::NoExecutor(job_name.clone()))?;

        let mut run = JobRun::new(&job_name, payload.clone());
        run.start();
        match executor.execute(payload.unwrap_or(Value::Null)).await {
            Ok(()) => run.complete(),
            Err(e) => run.fail(e.to_string()),
        }

        self.history.write().await.record(run.clone());
        Ok(run)
    }

    /// Runs newest first, optionally only those of one job type.
    pub async fn list_runs(
        &self,
        job_name: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Vec<JobRun> {
        self.history
            .read()
            .await
            .newest_first(job_name)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn count_runs(&self, job_name: Option<&str>) -> usize {
        self.history.read().await.count(job_name)
    }

    pub async fn clear_runs(&self) {
        self.history.write().await.clear();
    }

    pub async fn get_run(&self, id: Uuid) -> Option<JobRun> {
        self.history.read().await.get(id).cloned()
    }
}

/// Flatten the result of an executor task, telling panics apart from
/// cancellation.
fn task_outcome(
    job_type: &str,
    joined: Result<Result<(), JobQueueError>, JoinError>,
) -> Result<(), JobQueueError> {
    match joined {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(JobQueueError::Panicked {
            job_type: job_type.to_owned(),
        }),
        Err(_) => Err(JobQueueError::Cancelled {
            job_type: job_type.to_owned(),
        }),
    }
}
