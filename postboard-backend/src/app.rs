use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{jobs, posts};
use crate::state::AppState;

const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Build the primary axum router with the provided shared application state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/posts", get(posts::list).post(posts::create))
        .route("/posts/bulk-process", post(posts::bulk_process))
        .route("/posts/{postId}", get(posts::get))
        .route(
            "/admin/jobs/runs",
            get(jobs::list_runs).delete(jobs::clear_runs),
        )
        .route("/admin/jobs/{jobName}/run", post(jobs::run));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness: the database must answer a trivial query.
async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&*state.db_pool).await {
        Ok(_) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}
