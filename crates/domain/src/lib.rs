//! Tenant DNS Domain Layer
pub mod config;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod site;
pub mod zone_info;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{RecordData, RecordType, ResourceRecord};
pub use errors::DomainError;
pub use site::SiteRecord;
pub use zone_info::ZoneInfo;
