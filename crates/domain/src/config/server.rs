use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

use super::errors::ConfigError;

pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// `host[:port]` entries; the port defaults to 53
    #[serde(default = "default_listen")]
    pub listen: Vec<String>,

    /// Idle timeout for TCP connections, in seconds
    #[serde(default = "default_tcp_timeout")]
    pub tcp_timeout_secs: u64,

    /// Primary domain of the deployment, used to derive a default admin email
    #[serde(default = "default_primary_domain")]
    pub primary_domain: String,
}

fn default_listen() -> Vec<String> {
    vec!["0.0.0.0:53".to_string()]
}

fn default_tcp_timeout() -> u64 {
    10
}

fn default_primary_domain() -> String {
    "localhost".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            tcp_timeout_secs: default_tcp_timeout(),
            primary_domain: default_primary_domain(),
        }
    }
}

impl ServerConfig {
    /// Parses every listen entry. A single malformed entry fails the whole set.
    pub fn listen_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        if self.listen.is_empty() {
            return Ok(vec![SocketAddr::new(
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                DEFAULT_DNS_PORT,
            )]);
        }
        self.listen
            .iter()
            .map(String::as_str)
            .map(parse_listen_addr)
            .collect()
    }
}

/// Parses one listen entry.
///
/// Accepts `ip:port`, `[v6]:port`, a bare IP, `host:port` or a bare host.
/// Host names go through the system resolver and the first address wins.
pub fn parse_listen_addr(entry: &str) -> Result<SocketAddr, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidListenAddress {
        entry: entry.to_string(),
        reason,
    };

    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty entry".to_string()));
    }

    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let unbracketed = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    if let Ok(ip) = unbracketed.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }

    let (host, port) = match trimmed.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| invalid(format!("bad port '{}': {}", port.trim(), e)))?;
            (host.trim(), port)
        }
        Some(_) => return Err(invalid("unbracketed IPv6 address with port".to_string())),
        None => (trimmed, DEFAULT_DNS_PORT),
    };

    (host, port)
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid(format!("host '{}' did not resolve", host)))
}
