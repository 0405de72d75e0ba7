use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or opening the database pool.
#[derive(Debug, Error)]
pub enum DbConnectionError {
    #[error("database url cannot be empty")]
    EmptyDatabaseUrl,
    #[error("invalid pool setting {setting}: {reason}")]
    InvalidPoolSetting {
        setting: &'static str,
        reason: &'static str,
    },
    #[error("could not create database directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
