//! Tenant DNS Application Layer
//!
//! Zone resolution and record synthesis over the [`ports::SiteDirectory`] port.
pub mod ports;
pub mod services;
