use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::Json;
use serde::Serialize;

use super::RunView;
use crate::handlers::utils::parse_positive_usize;
use crate::{error::ApiError, state::AppState};

const DEFAULT_PER_PAGE: usize = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    page: usize,
    per_page: usize,
    total: usize,
}

/// GET /admin/jobs/runs
///
/// Newest runs first. Accepts `page`, `perPage` and a `jobName` filter.
pub async fn list_runs(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = parse_positive_usize(params.get("page"), 1, "page")?;
    let per_page = parse_positive_usize(params.get("perPage"), DEFAULT_PER_PAGE, "perPage")?;
    let job_name = params.get("jobName").map(String::as_str);

    let queue = &state.job_queue;
    let total = queue.count_runs(job_name).await;
    let runs = queue
        .list_runs(job_name, per_page, (page - 1).saturating_mul(per_page))
        .await;

    let items: Vec<RunView<'_>> = runs.iter().map(RunView::from).collect();
    let meta = PageMeta {
        page,
        per_page,
        total,
    };

    Ok(Json(serde_json::json!({ "items": items, "pagination": meta })))
}
