pub mod site_directory;

pub use site_directory::{BoxedSession, DirectorySession, SiteDirectory};
