use std::sync::Arc;

/// A tenant site as stored in the directory.
///
/// Owned by the directory; the resolver only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub domain_name: Arc<str>,
    /// Site-specific mail exchanger, overrides the configured default
    pub mail_server_name: Option<Arc<str>>,
    pub owner_id: i64,
}

impl SiteRecord {
    pub fn new(domain_name: impl Into<Arc<str>>, owner_id: i64) -> Self {
        Self {
            domain_name: domain_name.into(),
            mail_server_name: None,
            owner_id,
        }
    }

    pub fn with_mail_server(mut self, mail_server_name: impl Into<Arc<str>>) -> Self {
        self.mail_server_name = Some(mail_server_name.into());
        self
    }
}
