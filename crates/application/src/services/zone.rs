use std::collections::HashMap;
use std::sync::Arc;
use tenant_dns_domain::domain_name::{alias_equivalent, dot_count, is_within, is_wildcard, normalize};
use tenant_dns_domain::zone_info::serial_from_timestamp;
use tenant_dns_domain::{DomainError, ResourceRecord, SiteRecord, ZoneInfo};
use tracing::debug;

use super::record_synthesizer::{synthesize_alias, synthesize_site_records};
use super::session_scope::SessionScope;
use super::zone_settings::ZoneSettings;
use crate::ports::{BoxedSession, SiteDirectory};

/// An authoritative zone found for one query.
///
/// Holds the sites seen while walking up from the queried name. Names between
/// the covered domain and the root are answered from that cache, anything
/// else in the zone goes back to the directory. A zone lives for one query
/// and is dropped with the response.
pub struct Zone {
    root_domain: Arc<str>,
    covered_domain: String,
    cache: HashMap<String, SiteRecord>,
    serial: Option<u32>,
    directory: Arc<dyn SiteDirectory>,
    settings: Arc<ZoneSettings>,
}

impl Zone {
    pub(crate) fn new(
        root_domain: String,
        covered_domain: String,
        cache: HashMap<String, SiteRecord>,
        directory: Arc<dyn SiteDirectory>,
        settings: Arc<ZoneSettings>,
    ) -> Self {
        Self {
            root_domain: Arc::from(root_domain),
            covered_domain,
            cache,
            serial: None,
            directory,
            settings,
        }
    }

    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Lowest name whose answer is already known from the walk.
    pub fn covered_domain(&self) -> &str {
        &self.covered_domain
    }

    pub fn cached_domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = self.cache.keys().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }

    pub fn nameservers(&self) -> &[Arc<str>] {
        &self.settings.nameservers
    }

    pub fn primary_nameserver(&self) -> &str {
        &self.settings.primary_nameserver
    }

    pub fn admin_email(&self) -> &str {
        &self.settings.admin_email
    }

    pub fn ttl(&self) -> u32 {
        self.settings.zone_ttl
    }

    /// SOA serial derived from the newest change under the zone root.
    ///
    /// Looked up on first use only and kept for the lifetime of the zone.
    pub async fn serial_number(
        &mut self,
        ambient: Option<&mut BoxedSession>,
    ) -> Result<u32, DomainError> {
        if let Some(serial) = self.serial {
            return Ok(serial);
        }

        let directory = Arc::clone(&self.directory);
        let mut scope = SessionScope::new(directory.as_ref(), ambient);
        let latest = scope.latest_change(&self.root_domain).await?;
        let serial = serial_from_timestamp(latest);

        debug!(root = %self.root_domain, serial, "Zone serial computed");
        self.serial = Some(serial);
        Ok(serial)
    }

    /// Full SOA metadata, serial included.
    pub async fn info(&mut self, ambient: Option<&mut BoxedSession>) -> Result<ZoneInfo, DomainError> {
        let serial = self.serial_number(ambient).await?;
        Ok(self.settings.zone_info(&self.root_domain, serial))
    }

    /// Records for `domain` within this zone.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(records))` - The site's own records, or a single CNAME when
    ///   only the bare/www counterpart is hosted
    /// * `Ok(None)` - Outside the zone, wildcard, single label, or no site
    /// * `Err(DomainError)` - If a directory lookup fails
    pub async fn get_records(
        &mut self,
        domain: &str,
        ambient: Option<&mut BoxedSession>,
    ) -> Result<Option<Vec<ResourceRecord>>, DomainError> {
        let domain = normalize(domain);
        if !is_within(&domain, &self.root_domain) || dot_count(&domain) < 1 || is_wildcard(&domain) {
            return Ok(None);
        }

        let directory = Arc::clone(&self.directory);
        let mut scope = SessionScope::new(directory.as_ref(), ambient);

        if let Some(site) = self.lookup(&domain, &mut scope).await? {
            return Ok(Some(synthesize_site_records(&self.settings, &site)));
        }

        let Some(alt) = alias_equivalent(&domain) else {
            debug!(domain = %domain, "No site and no alias candidate");
            return Ok(None);
        };

        match self.lookup(&alt, &mut scope).await? {
            Some(site) => {
                debug!(domain = %domain, alias = %alt, "Answering with CNAME");
                self.cache.insert(alt.clone(), site);
                if domain == self.covered_domain && is_within(&alt, &domain) {
                    self.covered_domain = alt.clone();
                }
                Ok(Some(synthesize_alias(&self.settings, &alt)))
            }
            None => {
                debug!(domain = %domain, alias = %alt, "No site for name or alias");
                Ok(None)
            }
        }
    }

    async fn lookup(
        &self,
        domain: &str,
        scope: &mut SessionScope<'_>,
    ) -> Result<Option<SiteRecord>, DomainError> {
        if is_within(&self.covered_domain, domain) {
            debug!(domain, "Satisfying lookup from cache");
            return Ok(self.cache.get(domain).cloned());
        }
        scope.find_exact(domain).await
    }
}

impl std::fmt::Debug for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zone")
            .field("root_domain", &self.root_domain)
            .field("covered_domain", &self.covered_domain)
            .field("cached", &self.cached_domains())
            .field("serial", &self.serial)
            .finish()
    }
}
