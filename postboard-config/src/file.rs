//! On-disk configuration files.
//!
//! Every field is optional; anything left out keeps the value from the
//! layer below it.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawConfigFile {
    pub server: Option<ServerSection>,
    pub logging: Option<LoggingSection>,
    pub database: Option<DatabaseSection>,
    pub pagination: Option<PaginationSection>,
    pub jobs: Option<JobsSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub driver: Option<String>,
    pub path: Option<String>,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaginationSection {
    pub default_limit: Option<u32>,
    pub max_limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JobsSection {
    pub batch_size: Option<usize>,
    pub work_delay_ms: Option<u64>,
}

/// Serialization formats a config file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn parse(self, text: &str) -> Result<RawConfigFile, ConfigError> {
        let parsed: Result<RawConfigFile, String> = match self {
            #[cfg(feature = "toml")]
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            #[cfg(feature = "yaml")]
            Self::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            #[cfg(feature = "json")]
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            #[allow(unreachable_patterns)]
            other => Err(format!("{other:?} support is not compiled in")),
        };
        parsed.map_err(ConfigError::Parse)
    }
}

/// Read and parse a config file. Files without a recognised extension are
/// tried as YAML, then TOML, then JSON.
pub fn load_raw_from_file<P: AsRef<Path>>(path: P) -> Result<RawConfigFile, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;

    if let Some(format) = ConfigFormat::from_path(path) {
        return format.parse(&text);
    }

    [ConfigFormat::Yaml, ConfigFormat::Toml, ConfigFormat::Json]
        .into_iter()
        .find_map(|format| format.parse(&text).ok())
        .ok_or_else(|| {
            ConfigError::Parse(format!(
                "{} is not valid YAML, TOML or JSON",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut f = Builder::new().suffix(suffix).tempfile().expect("tmpfile");
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.TOML")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
    }

    #[test]
    fn reads_toml_sections() {
        let f = write_temp(
            ".toml",
            r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
path = "db.sqlite"

[pagination]
default_limit = 5
max_limit = 20
"#,
        );
        let raw = load_raw_from_file(f.path()).expect("load");
        let server = raw.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(3000));
        let db = raw.database.unwrap();
        assert_eq!(db.driver, None);
        assert_eq!(db.path.as_deref(), Some("db.sqlite"));
        let pagination = raw.pagination.unwrap();
        assert_eq!(pagination.default_limit, Some(5));
        assert_eq!(pagination.max_limit, Some(20));
    }

    #[test]
    fn sniffs_yaml_without_extension() {
        let f = write_temp(
            "",
            "server:\n  port: 9000\njobs:\n  batch_size: 25\n  work_delay_ms: 100\n",
        );
        let raw = load_raw_from_file(f.path()).expect("load");
        assert_eq!(raw.server.unwrap().port, Some(9000));
        let jobs = raw.jobs.unwrap();
        assert_eq!(jobs.batch_size, Some(25));
        assert_eq!(jobs.work_delay_ms, Some(100));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let f = write_temp(".json", "{ not json");
        assert!(matches!(
            load_raw_from_file(f.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
