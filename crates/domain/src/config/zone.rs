use serde::{Deserialize, Serialize};

use crate::zone_info::{DEFAULT_RECORD_TTL, DEFAULT_ZONE_TTL};

/// Authoritative zone settings shared by every tenant zone
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Host names published as NS records, in order
    #[serde(default)]
    pub nameservers: Vec<String>,

    /// SOA MNAME; falls back to the first nameserver
    #[serde(default)]
    pub primary_nameserver: Option<String>,

    /// SOA contact; falls back to `admin@<server.primary_domain>`
    #[serde(default)]
    pub admin_email: Option<String>,

    /// TTL of synthesized A/AAAA/MX/CNAME records (default: 7200)
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,

    /// TTL of SOA and NS records (default: 10800)
    #[serde(default = "default_zone_ttl")]
    pub zone_ttl: u32,

    /// Address published as the A record of every site
    #[serde(default)]
    pub ipv4: Option<String>,

    /// Address published as the AAAA record of every site
    #[serde(default)]
    pub ipv6: Option<String>,

    /// Mail exchanger for sites that don't name their own
    #[serde(default)]
    pub default_mail_server: Option<String>,
}

fn default_record_ttl() -> u32 {
    DEFAULT_RECORD_TTL
}

fn default_zone_ttl() -> u32 {
    DEFAULT_ZONE_TTL
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            primary_nameserver: None,
            admin_email: None,
            record_ttl: default_record_ttl(),
            zone_ttl: default_zone_ttl(),
            ipv4: None,
            ipv6: None,
            default_mail_server: None,
        }
    }
}

impl ZoneConfig {
    /// Nameserver entries with blanks trimmed and empty entries dropped.
    pub fn nameserver_names(&self) -> Vec<String> {
        self.nameservers
            .iter()
            .map(|ns| ns.trim())
            .filter(|ns| !ns.is_empty())
            .map(|ns| ns.trim_end_matches('.').to_ascii_lowercase())
            .collect()
    }
}
