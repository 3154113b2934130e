pub mod record_synthesizer;
pub mod session_scope;
pub mod zone;
pub mod zone_resolver;
pub mod zone_settings;

pub use session_scope::SessionScope;
pub use zone::Zone;
pub use zone_resolver::ZoneResolver;
pub use zone_settings::ZoneSettings;
