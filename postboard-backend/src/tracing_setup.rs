use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn install_tracing_from_config(cfg: &postboard_config::LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if cfg.json {
        builder
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = installed {
        eprintln!("tracing subscriber already installed: {e}");
    }
}
