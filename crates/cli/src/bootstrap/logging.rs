use tenant_dns_domain::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Noisy dependencies stay at WARN unless RUST_LOG says otherwise.
const QUIET_TARGETS: &str = "sqlx=warn,hickory_server=warn,hickory_proto=warn";

fn default_directives(level: &str) -> String {
    format!("{},{}", level.trim().to_ascii_lowercase(), QUIET_TARGETS)
}

/// RUST_LOG wins when set, else `logging.level` with quiet dependencies.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.logging.level)));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_ansi(true)
        .init();

    info!("Logging initialized at level: {}", config.logging.level);
}
