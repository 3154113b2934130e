use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tenant_dns_application::ports::SiteDirectory;
use tenant_dns_application::services::ZoneSettings;
use tenant_dns_domain::Config;
use tenant_dns_infrastructure::dns::{AuthoritativeHandler, NameServer};
use tenant_dns_infrastructure::repositories::SqliteSiteDirectory;
use tracing::info;

pub async fn start_dns_server(config: &Config, pool: SqlitePool) -> anyhow::Result<NameServer> {
    let settings = Arc::new(ZoneSettings::from_config(
        &config.zone,
        &config.server.primary_domain,
    )?);
    let directory: Arc<dyn SiteDirectory> = Arc::new(SqliteSiteDirectory::new(pool));
    let handler = AuthoritativeHandler::new(directory, settings);

    let listen = config.server.listen_addrs()?;
    info!(addrs = ?listen, "Starting nameserver");

    let server = NameServer::start(
        &listen,
        handler,
        Duration::from_secs(config.server.tcp_timeout_secs),
    )
    .await?;

    Ok(server)
}
