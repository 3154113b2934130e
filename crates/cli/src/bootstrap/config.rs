use tenant_dns_domain::{CliOverrides, Config};
use tracing::info;

/// Loads and validates the configuration. Runs before logging is set up,
/// so errors are returned rather than logged.
pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        listen = ?config.server.listen,
        nameservers = ?config.zone.nameservers,
        database = %config.database.path,
        "Configuration loaded"
    );
}
