use std::time::Instant;
use tenant_dns_domain::{DomainError, SiteRecord};
use tracing::{debug, trace};

use crate::ports::{BoxedSession, SiteDirectory};

/// Directory access scoped to a single resolver call.
///
/// Reuses the caller's ambient session when one is supplied. Otherwise a
/// session is opened on the first lookup and released when the scope is
/// dropped, which also covers early `?` returns.
pub struct SessionScope<'a> {
    directory: &'a dyn SiteDirectory,
    ambient: Option<&'a mut BoxedSession>,
    owned: Option<BoxedSession>,
}

impl<'a> SessionScope<'a> {
    pub fn new(directory: &'a dyn SiteDirectory, ambient: Option<&'a mut BoxedSession>) -> Self {
        Self {
            directory,
            ambient,
            owned: None,
        }
    }

    pub async fn find_exact(&mut self, domain: &str) -> Result<Option<SiteRecord>, DomainError> {
        let started = Instant::now();

        let site = if let Some(session) = self.ambient.as_mut() {
            session.find_exact(domain).await?
        } else {
            self.owned_session().await?.find_exact(domain).await?
        };

        debug!(
            domain,
            found = site.is_some(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Directory fetch"
        );
        Ok(site)
    }

    pub async fn latest_change(&mut self, root_domain: &str) -> Result<Option<i64>, DomainError> {
        if let Some(session) = self.ambient.as_mut() {
            return session.latest_change(root_domain).await;
        }
        self.owned_session().await?.latest_change(root_domain).await
    }

    async fn owned_session(&mut self) -> Result<&mut BoxedSession, DomainError> {
        let session = match self.owned.take() {
            Some(session) => session,
            None => {
                trace!("Opening directory session");
                self.directory.open_session().await?
            }
        };
        Ok(self.owned.insert(session))
    }
}

impl Drop for SessionScope<'_> {
    fn drop(&mut self) {
        if self.owned.take().is_some() {
            trace!("Directory session released");
        }
    }
}
