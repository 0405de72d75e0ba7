use std::net::Ipv4Addr;
use std::sync::Arc;

use postboard_backend::build_router;
use postboard_backend::state::AppState;
use postboard_db::DbConnectionConfig;
use postboard_job_queue::JobQueueClient;
use postboard_pagination::PaginationConfig;

#[tokio::test]
async fn startup_with_config_binds_and_serves_health() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg_path = dir.path().join("postboard.toml");
    std::fs::write(
        &cfg_path,
        "[pagination]\ndefault_limit = 5\nmax_limit = 20\n\n[jobs]\nbatch_size = 3\n",
    )
    .expect("write config");

    let cfg = postboard_config::load_config(Some(&cfg_path)).expect("load config");
    postboard_config::validate_config(&cfg).expect("valid config");
    assert_eq!(cfg.pagination.default_limit, 5);

    let pool = postboard_db::create_pool(&DbConnectionConfig::in_memory())
        .await
        .expect("create pool");
    postboard_migrations::sqlite_migrator()
        .run(&pool)
        .await
        .expect("migrations");

    let pagination = PaginationConfig::new(cfg.pagination.default_limit, cfg.pagination.max_limit);
    let state = AppState::new(pool, JobQueueClient::new(), pagination);
    let router = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local_addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });

    let base = format!("http://{}:{}", addr.ip(), addr.port());

    let res = reqwest::get(format!("{base}/health")).await.expect("health");
    assert!(res.status().is_success());

    let res = reqwest::get(format!("{base}/ready")).await.expect("ready");
    assert!(res.status().is_success());

    let res = reqwest::get(format!("{base}/api/v1/posts")).await.expect("posts");
    let body: serde_json::Value = res.json().await.expect("json");
    assert_eq!(body["pagination"]["limit"], serde_json::json!(5));

    handle.abort();
}
