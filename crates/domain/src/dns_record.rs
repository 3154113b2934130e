use std::net::IpAddr;
use std::sync::Arc;

/// MX ordinals above this would overflow the 16-bit preference once scaled.
pub const MAX_MX_ORDINAL: u32 = 6553;

/// Ordinal used for every synthesized mail exchanger.
pub const DEFAULT_MX_ORDINAL: u32 = 2;

/// Types a synthesized record can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
}

/// Payload of a synthesized resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// A or AAAA depending on the address family
    Address(IpAddr),
    MailExchange { priority: u16, target: Arc<str> },
    CanonicalName(Arc<str>),
}

/// A resource record produced for a tenant site. Every variant shares the TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn address(address: IpAddr, ttl: u32) -> Self {
        Self {
            ttl,
            data: RecordData::Address(address),
        }
    }

    /// Builds an MX record from an ordinal; the wire preference is
    /// `min(ordinal, 6553) * 10`.
    pub fn mail_exchange(ordinal: u32, target: impl Into<Arc<str>>, ttl: u32) -> Self {
        Self {
            ttl,
            data: RecordData::MailExchange {
                priority: mx_priority(ordinal),
                target: target.into(),
            },
        }
    }

    pub fn canonical_name(target: impl Into<Arc<str>>, ttl: u32) -> Self {
        Self {
            ttl,
            data: RecordData::CanonicalName(target.into()),
        }
    }

    pub fn record_type(&self) -> RecordType {
        match &self.data {
            RecordData::Address(IpAddr::V4(_)) => RecordType::A,
            RecordData::Address(IpAddr::V6(_)) => RecordType::AAAA,
            RecordData::MailExchange { .. } => RecordType::MX,
            RecordData::CanonicalName(_) => RecordType::CNAME,
        }
    }

    pub fn is_canonical_name(&self) -> bool {
        matches!(self.data, RecordData::CanonicalName(_))
    }
}

pub fn mx_priority(ordinal: u32) -> u16 {
    // 6553 * 10 = 65530 always fits
    (ordinal.min(MAX_MX_ORDINAL) * 10) as u16
}
