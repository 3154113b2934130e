use std::net::IpAddr;
use std::sync::Arc;
use tenant_dns_domain::dns_record::DEFAULT_MX_ORDINAL;
use tenant_dns_domain::{ResourceRecord, SiteRecord};

use super::zone_settings::ZoneSettings;

/// Records served for a domain that has its own site.
///
/// A and AAAA come from the configured server addresses. The MX target is
/// the site's own mail server, else the configured default, else no MX.
pub fn synthesize_site_records(settings: &ZoneSettings, site: &SiteRecord) -> Vec<ResourceRecord> {
    let ttl = settings.record_ttl;
    let mut records = Vec::with_capacity(3);

    if let Some(ipv4) = settings.ipv4 {
        records.push(ResourceRecord::address(IpAddr::V4(ipv4), ttl));
    }
    if let Some(ipv6) = settings.ipv6 {
        records.push(ResourceRecord::address(IpAddr::V6(ipv6), ttl));
    }

    let mail_server = site
        .mail_server_name
        .as_ref()
        .or(settings.default_mail_server.as_ref());
    if let Some(target) = mail_server {
        records.push(ResourceRecord::mail_exchange(
            DEFAULT_MX_ORDINAL,
            Arc::clone(target),
            ttl,
        ));
    }

    records
}

/// The single CNAME answered for a name whose bare/www counterpart is a site.
pub fn synthesize_alias(settings: &ZoneSettings, target: &str) -> Vec<ResourceRecord> {
    vec![ResourceRecord::canonical_name(target, settings.record_ttl)]
}
