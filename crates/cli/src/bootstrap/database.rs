use sqlx::SqlitePool;
use tenant_dns_domain::config::DatabaseConfig;
use tenant_dns_infrastructure::database::create_pool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    info!("Initializing database: {}", cfg.url());

    let pool = create_pool(cfg).await.map_err(|e| {
        error!("Failed to initialize site directory pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    let sites: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sites")
        .fetch_one(&pool)
        .await?;
    info!(sites, "Database initialized successfully");

    Ok(pool)
}
