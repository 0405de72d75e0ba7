use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// DELETE /admin/jobs/runs
pub async fn clear_runs(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let count = state.job_queue.count_runs(None).await;
    state.job_queue.clear_runs().await;
    info!(count, "cleared job run history");

    Ok(Json(json!({ "cleared": true, "count": count })))
}
