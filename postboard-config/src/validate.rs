use std::net::IpAddr;

use once_cell::sync::Lazy;
use postboard_pagination::MAX_LIMIT;
use regex::Regex;

use crate::{Config, ConfigError};

static HOSTNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([-a-zA-Z0-9.]*[a-zA-Z0-9])?$").expect("hostname regex")
});

/// Check cross-field constraints on a resolved configuration. Every problem
/// found is reported in one error.
pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    let mut problems: Vec<String> = Vec::new();

    if cfg.server.port == 0 {
        problems.push("server.port must be > 0".into());
    }
    let host = cfg.server.host.as_str();
    if host.parse::<IpAddr>().is_err() && !HOSTNAME_REGEX.is_match(host) {
        problems.push(format!("invalid server.host: {host}"));
    }

    if !cfg.database.driver.eq_ignore_ascii_case("sqlite") {
        problems.push(format!(
            "unsupported database driver: {}",
            cfg.database.driver
        ));
    }
    if cfg.database.path.trim().is_empty() {
        problems.push("database.path must not be empty".into());
    }
    if cfg.database.max_connections == Some(0) {
        problems.push("database.max_connections must be > 0".into());
    }

    let pagination = &cfg.pagination;
    if pagination.default_limit == 0 {
        problems.push("pagination.default_limit must be > 0".into());
    }
    if pagination.max_limit == 0 {
        problems.push("pagination.max_limit must be > 0".into());
    }
    if pagination.max_limit > MAX_LIMIT {
        problems.push(format!(
            "pagination.max_limit ({}) must not exceed {MAX_LIMIT}",
            pagination.max_limit
        ));
    }
    if pagination.default_limit > pagination.max_limit {
        problems.push(format!(
            "pagination.default_limit ({}) must not exceed pagination.max_limit ({})",
            pagination.default_limit, pagination.max_limit
        ));
    }

    if cfg.jobs.batch_size == 0 {
        problems.push("jobs.batch_size must be > 0".into());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(problems.join("; ")))
    }
}
