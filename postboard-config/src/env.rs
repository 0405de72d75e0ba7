//! `POSTBOARD_*` environment overrides.

use std::str::FromStr;

use crate::{Config, ConfigError};

/// Source of environment values. [`process_env`] in production, a map in
/// tests.
pub trait EnvLookup {
    fn get(&self, key: &str) -> Option<String>;
}

/// Look a key up in the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

struct Overrides<'a, E: ?Sized> {
    env: &'a E,
}

impl<E: EnvLookup + ?Sized> Overrides<'_, E> {
    fn string(&self, key: &str, target: &mut String) {
        if let Some(v) = self.env.get(key) {
            *target = v;
        }
    }

    fn number<T>(&self, key: &str, target: &mut T) -> Result<(), ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        if let Some(raw) = self.env.get(key) {
            *target = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::Parse(format!("invalid {key}: {e}")))?;
        }
        Ok(())
    }

    fn optional<T>(&self, key: &str, target: &mut Option<T>) -> Result<(), ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        if let Some(raw) = self.env.get(key) {
            let parsed = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::Parse(format!("invalid {key}: {e}")))?;
            *target = Some(parsed);
        }
        Ok(())
    }

    fn flag(&self, key: &str, target: &mut bool) -> Result<(), ConfigError> {
        if let Some(raw) = self.env.get(key) {
            *target = parse_bool(&raw)
                .ok_or_else(|| ConfigError::Parse(format!("invalid {key}: expected a boolean")))?;
        }
        Ok(())
    }
}

/// Apply every known `POSTBOARD_*` variable found in `env` on top of `cfg`.
pub fn apply_env_overrides<E: EnvLookup + ?Sized>(
    cfg: &mut Config,
    env: &E,
) -> Result<(), ConfigError> {
    let o = Overrides { env };

    o.string("POSTBOARD_SERVER_HOST", &mut cfg.server.host);
    o.number("POSTBOARD_SERVER_PORT", &mut cfg.server.port)?;

    o.string("POSTBOARD_LOG_LEVEL", &mut cfg.logging.level);
    o.flag("POSTBOARD_LOG_JSON", &mut cfg.logging.json)?;

    o.string("POSTBOARD_DATABASE_DRIVER", &mut cfg.database.driver);
    // URL is accepted as an alias and wins over PATH when both are set.
    for key in ["POSTBOARD_DATABASE_PATH", "POSTBOARD_DATABASE_URL"] {
        if let Some(v) = env.get(key) {
            cfg.database.path = v;
        }
    }
    o.optional(
        "POSTBOARD_DATABASE_MAX_CONNECTIONS",
        &mut cfg.database.max_connections,
    )?;

    o.number(
        "POSTBOARD_PAGINATION_DEFAULT_LIMIT",
        &mut cfg.pagination.default_limit,
    )?;
    o.number("POSTBOARD_PAGINATION_MAX_LIMIT", &mut cfg.pagination.max_limit)?;

    o.number("POSTBOARD_JOBS_BATCH_SIZE", &mut cfg.jobs.batch_size)?;
    o.number("POSTBOARD_JOBS_WORK_DELAY_MS", &mut cfg.jobs.work_delay_ms)?;

    Ok(())
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
