use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use postboard_db::DbConnectionConfig;
use postboard_jobs::PostJobSettings;
use postboard_pagination::PaginationConfig;

/// Build database connection config from application config.
///
/// `database.path` may be a bare file path, a `sqlite:` URL or `:memory:`.
/// In-memory databases always get a single-connection pool, so
/// `database.max_connections` is ignored for them.
pub fn database_config_from_config(cfg: &postboard_config::Config) -> DbConnectionConfig {
    let mut db = DbConnectionConfig::new(sqlite_url(&cfg.database.path));
    if let Some(max) = cfg.database.max_connections.filter(|_| !db.target().is_memory()) {
        db.max_connections = max;
        db.min_connections = db.min_connections.min(max);
    }
    db
}

fn sqlite_url(path: &str) -> String {
    match path.trim() {
        ":memory:" => "sqlite::memory:".to_owned(),
        url if url.starts_with("sqlite:") => url.to_owned(),
        file => format!("sqlite://{file}"),
    }
}

pub fn pagination_from_config(cfg: &postboard_config::Config) -> PaginationConfig {
    PaginationConfig::new(cfg.pagination.default_limit, cfg.pagination.max_limit)
}

pub fn job_settings_from_config(cfg: &postboard_config::Config) -> PostJobSettings {
    PostJobSettings {
        batch_size: cfg.jobs.batch_size,
        work_delay: std::time::Duration::from_millis(cfg.jobs.work_delay_ms),
    }
}

/// Parse host:port into a SocketAddr, with fallback to 0.0.0.0.
pub fn parse_bind_address(host: &str, port: u16) -> SocketAddr {
    host.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, port))
        .or_else(|_| host.parse::<SocketAddr>())
        .or_else(|_| {
            host.trim_matches(|c| c == '[' || c == ']')
                .parse::<Ipv6Addr>()
                .map(|ip| SocketAddr::new(IpAddr::V6(ip), port))
        })
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], port)))
}
