use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DbConnectionConfig;
use crate::error::DbConnectionError;
use crate::target::SqliteTarget;

pub type DbPool = SqlitePool;

/// Open a pool for the configured database.
///
/// File databases are created, along with any missing parent directory, if
/// they do not exist yet. Pools without an idle timeout also keep their
/// connections forever, which is what in-memory databases need to survive.
pub async fn create_pool(config: &DbConnectionConfig) -> Result<DbPool, DbConnectionError> {
    let url = config.url.trim();
    if url.is_empty() {
        return Err(DbConnectionError::EmptyDatabaseUrl);
    }
    config.check()?;

    let target = SqliteTarget::from_url(url);
    if let Some(dir) = target
        .path()
        .and_then(|p| p.parent())
        .filter(|dir| !dir.as_os_str().is_empty() && !dir.exists())
    {
        std::fs::create_dir_all(dir).map_err(|source| DbConnectionError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let connect = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(config.idle_timeout());
    if config.idle_timeout().is_none() {
        options = options.max_lifetime(None);
    }

    let pool = options.connect_with(connect).await?;
    tracing::debug!(
        database = %target,
        max_connections = config.max_connections,
        "database pool created"
    );
    Ok(pool)
}
