use super::fixtures::{SiteFixture, TestSites};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tenant_dns_application::services::ZoneSettings;
use tenant_dns_domain::config::{DatabaseConfig, ZoneConfig};
use tenant_dns_infrastructure::database::create_pool;
use tenant_dns_infrastructure::dns::{AuthoritativeHandler, NameServer};
use tenant_dns_infrastructure::repositories::SqliteSiteDirectory;

const MIGRATIONS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../migrations");

/// A nameserver on an ephemeral loopback port backed by an in-memory
/// directory.
pub struct TestServer {
    server: NameServer,
    pool: SqlitePool,
}

impl TestServer {
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        Self::start_with(TestSites::hosting()).await
    }

    pub async fn start_with(sites: Vec<SiteFixture>) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = create_pool(&DatabaseConfig {
            path: "sqlite::memory:".to_string(),
            max_connections: 1,
            migrations_path: MIGRATIONS_PATH.to_string(),
        })
        .await?;

        for site in &sites {
            sqlx::query(
                "INSERT INTO sites (domain_name, mail_server_name, owner_id, updated_at)
                 VALUES (?, ?, 1, ?)",
            )
            .bind(site.domain)
            .bind(site.mail_server)
            .bind(site.updated_at)
            .execute(&pool)
            .await?;
        }

        let zone = ZoneConfig {
            nameservers: TestSites::nameservers(),
            ipv4: Some(TestSites::ipv4().to_string()),
            ipv6: Some(TestSites::ipv6().to_string()),
            default_mail_server: Some("mx.hosting.test".to_string()),
            ..Default::default()
        };
        let settings = Arc::new(ZoneSettings::from_config(&zone, "hosting.test")?);
        let directory = Arc::new(SqliteSiteDirectory::new(pool.clone()));
        let handler = AuthoritativeHandler::new(directory, settings);

        let listen: SocketAddr = "127.0.0.1:0".parse()?;
        let server = NameServer::start(&[listen], handler, Duration::from_secs(5)).await?;

        Ok(Self { server, pool })
    }

    pub fn addr(&self) -> SocketAddr {
        self.server.local_addrs()[0]
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn shutdown(self) {
        self.server.stop().await.expect("nameserver stops cleanly");
        self.pool.close().await;
    }
}
