use serde::{Deserialize, Serialize};

/// Database configuration for the site directory
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file (default: "./tenant-dns.db")
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Pool size; every in-flight query holds at most one connection
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Directory holding the SQL migrations (default: "./migrations")
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            migrations_path: default_migrations_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

fn default_db_path() -> String {
    "./tenant-dns.db".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_migrations_path() -> String {
    "./migrations".to_string()
}
