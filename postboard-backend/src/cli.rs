use std::path::PathBuf;

use clap::Parser;

/// Postboard HTTP server.
#[derive(Debug, Parser)]
#[command(name = "postboard-backend", version, about)]
pub struct CliArgs {
    /// Path to a TOML, YAML or JSON configuration file.
    #[arg(short = 'c', long = "config-path", env = "POSTBOARD_CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_path_flag() {
        let args = CliArgs::try_parse_from(["postboard-backend", "--config-path", "cfg.toml"])
            .unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("cfg.toml")));

        let args = CliArgs::try_parse_from(["postboard-backend", "-c", "other.yaml"]).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("other.yaml")));
    }
}
