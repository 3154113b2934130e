//! Configuration module for Tenant DNS
//!
//! This module contains all configuration structures organized by domain:
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listen addresses and transport settings
//! - `zone`: Nameservers, SOA contact and synthesized record defaults
//! - `database`: Site directory database
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod database;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod zone;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::{parse_listen_addr, ServerConfig, DEFAULT_DNS_PORT};
pub use zone::ZoneConfig;
