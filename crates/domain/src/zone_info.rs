use std::sync::Arc;

pub const DEFAULT_REFRESH: u32 = 3600;
pub const DEFAULT_RETRY: u32 = 600;
pub const DEFAULT_EXPIRE: u32 = 86400;
pub const DEFAULT_MINIMUM: u32 = 3600;
pub const DEFAULT_ZONE_TTL: u32 = 10800;
pub const DEFAULT_RECORD_TTL: u32 = 7200;

/// Serial reported when the directory knows nothing about a zone's freshness.
pub const FALLBACK_SERIAL: u32 = 1;

/// SOA and NS metadata for a synthesized zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    pub root_domain: Arc<str>,
    pub nameservers: Arc<[Arc<str>]>,
    pub primary_nameserver: Arc<str>,
    pub admin_email: Arc<str>,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
    pub ttl: u32,
}

impl ZoneInfo {
    /// SOA RNAME form of the admin email: `hostmaster@example.com` becomes
    /// `hostmaster.example.com`, with dots in the local part escaped.
    pub fn admin_mailbox(&self) -> String {
        match self.admin_email.split_once('@') {
            Some((local, host)) => format!("{}.{}", local.replace('.', "\\."), host),
            None => self.admin_email.to_string(),
        }
    }
}

/// Converts a directory modification time into an SOA serial.
pub fn serial_from_timestamp(latest_change: Option<i64>) -> u32 {
    match latest_change {
        Some(ts) if ts > 0 => u32::try_from(ts).unwrap_or(u32::MAX),
        _ => FALLBACK_SERIAL,
    }
}
