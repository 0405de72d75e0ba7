//! Layered configuration for the postboard server.
//!
//! Values are resolved in three layers, later ones winning: built-in
//! defaults, an optional config file (TOML, YAML or JSON), and `POSTBOARD_*`
//! environment variables.

use std::path::Path;

use serde::Serialize;

mod env;
mod file;
mod validate;

pub use env::{apply_env_overrides, process_env, EnvLookup};
pub use file::{
    load_raw_from_file, ConfigFormat, DatabaseSection, JobsSection, LoggingSection,
    PaginationSection, RawConfigFile, ServerSection,
};
pub use validate::validate_config;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Fully resolved application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` overrides it at startup.
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseConfig {
    pub driver: String,
    /// File path or sqlite URL. `:memory:` selects a private in-memory
    /// database.
    pub path: String,
    pub max_connections: Option<u32>,
}

/// Page size policy for cursor-paginated listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobsConfig {
    /// Number of posts handed to each batch job by the bulk job.
    pub batch_size: usize,
    /// Simulated work time for each per-post job.
    pub work_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
            },
            logging: LoggingConfig {
                level: "info".into(),
                json: false,
            },
            database: DatabaseConfig {
                driver: "sqlite".into(),
                path: "postboard.sqlite".into(),
                max_connections: None,
            },
            pagination: PaginationConfig {
                default_limit: 2,
                max_limit: 50,
            },
            jobs: JobsConfig {
                batch_size: 10,
                work_delay_ms: 0,
            },
        }
    }
}

/// Overwrite `$target` when `$source` holds a value. With `some` the target
/// is itself an `Option` and keeps the wrapper.
macro_rules! merge {
    ($target:expr, $source:expr) => {
        if let Some(v) = $source {
            $target = v;
        }
    };
    (some $target:expr, $source:expr) => {
        if let Some(v) = $source {
            $target = Some(v);
        }
    };
}

impl Config {
    /// Layer the values present in a parsed config file over `self`.
    pub fn merge_file(&mut self, raw: RawConfigFile) {
        if let Some(s) = raw.server {
            merge!(self.server.host, s.host);
            merge!(self.server.port, s.port);
        }
        if let Some(l) = raw.logging {
            merge!(self.logging.level, l.level);
            merge!(self.logging.json, l.json);
        }
        if let Some(d) = raw.database {
            merge!(self.database.driver, d.driver);
            merge!(self.database.path, d.path);
            merge!(some self.database.max_connections, d.max_connections);
        }
        if let Some(p) = raw.pagination {
            merge!(self.pagination.default_limit, p.default_limit);
            merge!(self.pagination.max_limit, p.max_limit);
        }
        if let Some(j) = raw.jobs {
            merge!(self.jobs.batch_size, j.batch_size);
            merge!(self.jobs.work_delay_ms, j.work_delay_ms);
        }
    }
}

/// Resolve configuration from defaults, the optional file at `path`, and the
/// process environment. The result is not validated; see [`validate_config`].
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config, ConfigError> {
    load_config_with_env(path, &process_env)
}

/// [`load_config`] with an explicit environment.
pub fn load_config_with_env<P, E>(path: Option<P>, env: &E) -> Result<Config, ConfigError>
where
    P: AsRef<Path>,
    E: EnvLookup + ?Sized,
{
    let mut cfg = Config::default();
    if let Some(path) = path {
        cfg.merge_file(load_raw_from_file(path)?);
    }
    apply_env_overrides(&mut cfg, env)?;
    Ok(cfg)
}
