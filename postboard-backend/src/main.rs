//! Postboard backend server
//!
//! Entry point for the postboard-backend server with configuration loading,
//! database migrations, job executor registration and HTTP server startup.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use postboard_job_queue::JobQueueClient;
use tokio::net::TcpListener;

use postboard_backend::state::AppState;

mod cli;
mod config_helpers;
mod tracing_setup;

use cli::CliArgs;
use config_helpers::{
    database_config_from_config, job_settings_from_config, pagination_from_config,
    parse_bind_address,
};
use tracing_setup::install_tracing_from_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = postboard_config::load_config(args.config_path.as_deref())
        .context("failed to load configuration")?;
    postboard_config::validate_config(&config).context("invalid configuration")?;

    install_tracing_from_config(&config.logging);
    tracing::info!(config_path = ?args.config_path, "configuration loaded");

    let db_cfg = database_config_from_config(&config);
    let db_pool = postboard_db::create_pool(&db_cfg)
        .await
        .context("failed to create database pool")?;
    run_migrations(&db_pool).await?;

    tracing::info!(
        database = %db_cfg.target(),
        db_max_connections = db_cfg.max_connections,
        "database configured"
    );

    let job_queue = JobQueueClient::new();
    let job_settings = job_settings_from_config(&config);
    postboard_jobs::register_all_executors(&job_queue, db_pool.clone(), job_settings).await;
    tracing::info!(
        batch_size = job_settings.batch_size,
        work_delay_ms = config.jobs.work_delay_ms,
        "job executors registered"
    );

    let state = AppState::new(db_pool, job_queue, pagination_from_config(&config));
    let app = postboard_backend::build_router(Arc::new(state));

    let addr = parse_bind_address(&config.server.host, config.server.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn run_migrations(db_pool: &postboard_db::DbPool) -> anyhow::Result<()> {
    tracing::info!("applying SQLite migrations");
    match postboard_migrations::sqlite_migrator().run(db_pool).await {
        Ok(()) => {
            tracing::info!("database migrations applied successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!(%e, "failed to apply database migrations");
            Err(anyhow::anyhow!("failed to apply database migrations: {e}"))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
