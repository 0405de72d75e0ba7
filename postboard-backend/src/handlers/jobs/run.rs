use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::Json;
use serde_json::Value;

use super::RunView;
use crate::{error::ApiError, state::AppState};

fn optional_payload(body: &str) -> Result<Option<Value>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

/// POST /admin/jobs/{jobName}/run
///
/// Executes the job on the request task and returns the finished run. The
/// request body, if any, is the job payload.
pub async fn run(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let Some(job_name) = path.get("jobName") else {
        return Err(ApiError::bad_request("missing jobName path parameter"));
    };

    let finished = state
        .job_queue
        .run_job(job_name.as_str(), optional_payload(&body)?)
        .await?;

    Ok(Json(serde_json::to_value(RunView::from(&finished))?))
}
