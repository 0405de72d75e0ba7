#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use postboard_backend::state::AppState;
use postboard_db::posts::{self, NewPostRow};
use postboard_db::{create_pool, DbConnectionConfig, DbPool, PostStatus};
use postboard_job_queue::JobQueueClient;
use postboard_jobs::{register_all_executors, PostJobSettings};
use postboard_pagination::PaginationConfig;
use serde_json::Value;
use tower::ServiceExt;

pub async fn migrated_pool() -> DbPool {
    let pool = create_pool(&DbConnectionConfig::in_memory())
        .await
        .expect("create pool");
    postboard_migrations::sqlite_migrator()
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

/// State backed by a fresh in-memory database with every post executor
/// registered.
pub async fn test_state() -> Arc<AppState> {
    let pool = migrated_pool().await;
    let job_queue = JobQueueClient::new();
    register_all_executors(
        &job_queue,
        pool.clone(),
        PostJobSettings {
            batch_size: 2,
            ..PostJobSettings::default()
        },
    )
    .await;
    Arc::new(AppState::new(pool, job_queue, PaginationConfig::default()))
}

pub async fn seed_posts(state: &AppState, author: &str, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let row = NewPostRow {
            title: format!("{author} post {i}"),
            content: format!("Post number {i} written by {author}"),
            author: author.to_owned(),
            status: PostStatus::Draft,
            published_at: None,
            created_at: "2025-10-07T17:54:57+00:00".to_owned(),
        };
        let stored = posts::insert_post(&*state.db_pool, &row)
            .await
            .expect("insert post");
        ids.push(stored.id);
    }
    ids
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
