use serde::{Deserialize, Serialize};
use std::path::Path;

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::zone::ZoneConfig;

/// Config files probed when no path is given on the command line
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["./tenant-dns.toml", "/etc/tenant-dns/tenant-dns.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub zone: ZoneConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub listen: Vec<String>,
    pub nameservers: Option<Vec<String>>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads the config file, falling back to defaults when none exists, then
    /// applies the command-line overrides.
    ///
    /// An explicitly named file that can't be read is an error.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None => match DEFAULT_CONFIG_PATHS
                .iter()
                .map(Path::new)
                .find(|p| p.exists())
            {
                Some(p) => Self::from_file(p)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if !overrides.listen.is_empty() {
            self.server.listen = overrides.listen;
        }
        if let Some(nameservers) = overrides.nameservers {
            self.zone.nameservers = nameservers;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Startup checks; any failure here must keep the server from starting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zone.nameserver_names().is_empty() {
            return Err(ConfigError::MissingNameservers);
        }
        if self.zone.record_ttl == 0 {
            return Err(ConfigError::InvalidValue {
                field: "zone.record_ttl",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.zone.zone_ttl == 0 {
            return Err(ConfigError::InvalidValue {
                field: "zone.zone_ttl",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path",
                reason: "cannot be empty".to_string(),
            });
        }
        if !self.logging.is_valid_level() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: format!("unknown level '{}'", self.logging.level),
            });
        }
        self.server.listen_addrs()?;
        Ok(())
    }
}
