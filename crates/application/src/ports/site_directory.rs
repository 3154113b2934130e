use async_trait::async_trait;
use tenant_dns_domain::{DomainError, SiteRecord};

/// An open session against the backing store.
pub type BoxedSession = Box<dyn DirectorySession>;

/// Tenant directory: maps hosted domain names to site records.
///
/// Lookups are exact and case-insensitive; callers pass names already
/// lowercased. There is no wildcard or prefix matching.
#[async_trait]
pub trait SiteDirectory: Send + Sync {
    /// Opens a session against the backing store.
    ///
    /// The session is released when the returned box is dropped.
    ///
    /// # Errors
    ///
    /// * `DomainError::DirectoryUnavailable` - If no session can be acquired
    async fn open_session(&self) -> Result<BoxedSession, DomainError>;
}

/// Lookups executed within one backing-store session.
#[async_trait]
pub trait DirectorySession: Send {
    /// Exact lookup of a lowercased domain name.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(SiteRecord))` - If a site is hosted at exactly this name
    /// * `Ok(None)` - If no site matches
    /// * `Err(DomainError)` - If the lookup fails
    async fn find_exact(&mut self, domain: &str) -> Result<Option<SiteRecord>, DomainError>;

    /// Newest modification time (unix seconds) of any site at or under
    /// `root_domain`, or `None` when the directory has nothing to report.
    async fn latest_change(&mut self, root_domain: &str) -> Result<Option<i64>, DomainError>;
}
