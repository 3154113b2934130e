use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use tenant_dns_domain::config::ZoneConfig;
use tenant_dns_domain::zone_info::{DEFAULT_EXPIRE, DEFAULT_MINIMUM, DEFAULT_REFRESH, DEFAULT_RETRY};
use tenant_dns_domain::{ConfigError, ZoneInfo};
use tracing::{info, warn};

/// Immutable startup configuration shared by every resolution.
///
/// Built once from [`ZoneConfig`] and handed around behind an `Arc`; nothing
/// mutates it after startup, so concurrent queries read it without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSettings {
    pub nameservers: Arc<[Arc<str>]>,
    pub primary_nameserver: Arc<str>,
    pub admin_email: Arc<str>,
    pub record_ttl: u32,
    pub zone_ttl: u32,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
    pub default_mail_server: Option<Arc<str>>,
}

impl ZoneSettings {
    /// Resolves defaults and parses addresses.
    ///
    /// Fails only when no nameserver is configured. A missing primary
    /// nameserver or admin email falls back with a warning, and an address
    /// of the wrong family is logged and left out.
    pub fn from_config(config: &ZoneConfig, primary_domain: &str) -> Result<Self, ConfigError> {
        let nameservers: Vec<Arc<str>> = config
            .nameserver_names()
            .into_iter()
            .map(Arc::from)
            .collect();
        let first = nameservers
            .first()
            .cloned()
            .ok_or(ConfigError::MissingNameservers)?;

        let primary_nameserver: Arc<str> = match non_blank(&config.primary_nameserver) {
            Some(ns) => Arc::from(ns.trim_end_matches('.').to_ascii_lowercase()),
            None => {
                warn!(fallback = %first, "No primary nameserver configured");
                first
            }
        };

        let admin_email: Arc<str> = match non_blank(&config.admin_email) {
            Some(email) => Arc::from(email),
            None => {
                let fallback = format!("admin@{}", primary_domain.trim());
                warn!(fallback = %fallback, "No admin email configured");
                Arc::from(fallback)
            }
        };

        let ipv4 = non_blank(&config.ipv4).and_then(|v| match v.parse::<Ipv4Addr>() {
            Ok(addr) => Some(addr),
            Err(e) => {
                warn!(value = %v, error = %e, "Invalid IPv4 address, no A records will be served");
                None
            }
        });

        let ipv6 = non_blank(&config.ipv6).and_then(|v| match v.parse::<Ipv6Addr>() {
            Ok(addr) => Some(addr),
            Err(e) => {
                warn!(value = %v, error = %e, "Invalid IPv6 address, no AAAA records will be served");
                None
            }
        });

        let settings = Self {
            nameservers: Arc::from(nameservers),
            primary_nameserver,
            admin_email,
            record_ttl: config.record_ttl,
            zone_ttl: config.zone_ttl,
            ipv4,
            ipv6,
            default_mail_server: non_blank(&config.default_mail_server).map(Arc::from),
        };

        info!(
            nameservers = settings.nameservers.len(),
            primary = %settings.primary_nameserver,
            ipv4 = ?settings.ipv4,
            ipv6 = ?settings.ipv6,
            default_mx = ?settings.default_mail_server,
            "Zone settings loaded"
        );

        Ok(settings)
    }

    pub fn zone_info(&self, root_domain: &str, serial: u32) -> ZoneInfo {
        ZoneInfo {
            root_domain: Arc::from(root_domain),
            nameservers: Arc::clone(&self.nameservers),
            primary_nameserver: Arc::clone(&self.primary_nameserver),
            admin_email: Arc::clone(&self.admin_email),
            serial,
            refresh: DEFAULT_REFRESH,
            retry: DEFAULT_RETRY,
            expire: DEFAULT_EXPIRE,
            minimum: DEFAULT_MINIMUM,
            ttl: self.zone_ttl,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
