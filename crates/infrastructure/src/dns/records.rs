//! Conversion of synthesized records into hickory wire records.

use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, SOA};
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use std::net::IpAddr;
use std::sync::Arc;
use tenant_dns_domain::{DomainError, RecordData, RecordType, ResourceRecord, ZoneInfo};

pub struct RecordMapper;

impl RecordMapper {
    /// Convert domain RecordType → hickory RecordType
    pub fn to_hickory_type(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
        }
    }

    /// Whether `record` answers a question of type `qtype`.
    pub fn answers(record: &ResourceRecord, qtype: HickoryRecordType) -> bool {
        qtype == HickoryRecordType::ANY || Self::to_hickory_type(record.record_type()) == qtype
    }

    /// Parses a host name as a fully qualified name.
    pub fn fqdn(host: &str) -> Result<Name, DomainError> {
        let trimmed = host.trim().trim_end_matches('.');
        Name::from_ascii(format!("{}.", trimmed)).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", host, e))
        })
    }

    pub fn to_hickory_record(owner: &Name, record: &ResourceRecord) -> Result<Record, DomainError> {
        let rdata = match &record.data {
            RecordData::Address(IpAddr::V4(ip)) => RData::A(A(*ip)),
            RecordData::Address(IpAddr::V6(ip)) => RData::AAAA(AAAA(*ip)),
            RecordData::MailExchange { priority, target } => {
                RData::MX(MX::new(*priority, Self::fqdn(target)?))
            }
            RecordData::CanonicalName(target) => RData::CNAME(CNAME(Self::fqdn(target)?)),
        };

        Ok(Record::from_rdata(owner.clone(), record.ttl, rdata))
    }

    /// SOA for the zone apex. The admin email is written as an RNAME.
    pub fn soa_record(info: &ZoneInfo) -> Result<Record, DomainError> {
        let soa = SOA::new(
            Self::fqdn(&info.primary_nameserver)?,
            Self::fqdn(&info.admin_mailbox())?,
            info.serial,
            to_i32(info.refresh),
            to_i32(info.retry),
            to_i32(info.expire),
            info.minimum,
        );

        Ok(Record::from_rdata(
            Self::fqdn(&info.root_domain)?,
            info.ttl,
            RData::SOA(soa),
        ))
    }

    pub fn ns_records(
        root_domain: &str,
        nameservers: &[Arc<str>],
        ttl: u32,
    ) -> Result<Vec<Record>, DomainError> {
        let apex = Self::fqdn(root_domain)?;
        nameservers
            .iter()
            .map(|ns| {
                Ok(Record::from_rdata(
                    apex.clone(),
                    ttl,
                    RData::NS(NS(Self::fqdn(ns)?)),
                ))
            })
            .collect()
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
