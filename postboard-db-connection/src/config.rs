use std::time::Duration;

use serde::Deserialize;

use crate::error::DbConnectionError;
use crate::target::SqliteTarget;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Settings for a SQLite connection pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DbConnectionConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// `None` keeps idle connections open for the life of the pool.
    pub idle_timeout_secs: Option<u64>,
}

impl Default for DbConnectionConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            idle_timeout_secs: Some(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

impl DbConnectionConfig {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        if SqliteTarget::from_url(&url).is_memory() {
            return Self { url, ..Self::in_memory() };
        }
        Self {
            url,
            ..Self::default()
        }
    }

    /// A private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that never idles out.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout_secs: None,
            ..Self::default()
        }
    }

    /// Reject pool sizes sqlx would choke on.
    pub fn check(&self) -> Result<(), DbConnectionError> {
        if self.max_connections == 0 {
            return Err(DbConnectionError::InvalidPoolSetting {
                setting: "max_connections",
                reason: "must be at least 1",
            });
        }
        if self.min_connections > self.max_connections {
            return Err(DbConnectionError::InvalidPoolSetting {
                setting: "min_connections",
                reason: "must not exceed max_connections",
            });
        }
        if self.target().is_memory() && self.max_connections > 1 {
            return Err(DbConnectionError::InvalidPoolSetting {
                setting: "max_connections",
                reason: "in-memory databases need a single connection",
            });
        }
        Ok(())
    }

    #[inline]
    pub fn target(&self) -> SqliteTarget {
        SqliteTarget::from_url(&self.url)
    }

    #[inline]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[inline]
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}
