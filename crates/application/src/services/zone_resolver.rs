use std::collections::HashMap;
use std::sync::Arc;
use tenant_dns_domain::domain_name::{dot_count, normalize, parent, WWW_PREFIX};
use tenant_dns_domain::DomainError;
use tracing::{debug, instrument};

use super::session_scope::SessionScope;
use super::zone::Zone;
use super::zone_settings::ZoneSettings;
use crate::ports::{BoxedSession, SiteDirectory};

/// Finds the authoritative zone for a queried name.
///
/// Stateless between calls: every resolution walks the directory again and
/// builds a fresh cache, so concurrent queries share nothing but the
/// read-only settings.
pub struct ZoneResolver {
    directory: Arc<dyn SiteDirectory>,
    settings: Arc<ZoneSettings>,
}

impl ZoneResolver {
    pub fn new(directory: Arc<dyn SiteDirectory>, settings: Arc<ZoneSettings>) -> Self {
        Self {
            directory,
            settings,
        }
    }

    pub fn settings(&self) -> &Arc<ZoneSettings> {
        &self.settings
    }

    /// Locates the zone answering for `name`.
    ///
    /// Walks down the name to the first hosted site, then keeps walking up
    /// while ancestors are hosted too. The topmost hosted ancestor is the
    /// zone root. A bare name whose `www.` form is hosted gets a zone rooted
    /// at the bare name, and a hosted `www.` name is rooted at its bare form.
    ///
    /// # Arguments
    ///
    /// * `name` - Queried name, any case, with or without the root dot
    /// * `ambient` - Session owned by the caller, reused instead of opening one
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Zone))` - A zone is authoritative for the name
    /// * `Ok(None)` - Single-label name or no hosted site anywhere above it
    /// * `Err(DomainError)` - If a directory lookup fails
    #[instrument(skip(self, ambient))]
    pub async fn find_best_zone(
        &self,
        name: &str,
        ambient: Option<&mut BoxedSession>,
    ) -> Result<Option<Zone>, DomainError> {
        let mut queried = normalize(name);
        let dots = dot_count(&queried);
        if dots < 1 {
            return Ok(None);
        }

        let mut scope = SessionScope::new(self.directory.as_ref(), ambient);
        let mut cache = HashMap::new();

        let mut bottom = None;
        let mut candidate = Some(queried.as_str());
        while let Some(domain) = candidate {
            if let Some(site) = scope.find_exact(domain).await? {
                bottom = Some((domain.to_string(), site));
                break;
            }
            candidate = parent(domain);
        }

        let mut root: Option<String> = None;
        if let Some((bottom_domain, site)) = bottom {
            let mut level = bottom_domain;
            let mut site = site;
            loop {
                let next = parent(&level).map(str::to_string);
                debug!(domain = %level, "Caching site");
                cache.insert(level.clone(), site);
                root = Some(level);
                let Some(next) = next else {
                    break;
                };
                match scope.find_exact(&next).await? {
                    Some(found) => {
                        level = next;
                        site = found;
                    }
                    None => break,
                }
            }
        }

        if root.is_none() && dots == 1 {
            let alias = format!("{WWW_PREFIX}{queried}");
            if let Some(site) = scope.find_exact(&alias).await? {
                cache.insert(alias.clone(), site);
                root = Some(std::mem::replace(&mut queried, alias));
            }
        } else if dots == 2 && root.as_deref() == Some(queried.as_str()) {
            if let Some(bare) = queried.strip_prefix(WWW_PREFIX) {
                root = Some(bare.to_string());
            }
        }

        drop(scope);

        let Some(root) = root else {
            debug!(queried = %queried, "No zone found");
            return Ok(None);
        };

        debug!(root = %root, covered = %queried, cached = cache.len(), "Zone resolved");
        Ok(Some(Zone::new(
            root,
            queried,
            cache,
            Arc::clone(&self.directory),
            Arc::clone(&self.settings),
        )))
    }
}
