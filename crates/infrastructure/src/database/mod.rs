use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tenant_dns_domain::config::DatabaseConfig;
use tracing::info;

/// Opens the site directory pool and applies pending migrations.
///
/// An in-memory database is private to its connection, so the pool is
/// pinned to a single connection in that case.
pub async fn create_pool(cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let url = cfg.url();
    let in_memory = url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(&url)?
        .create_if_missing(true)
        // Avoid SQLITE_BUSY while an operator edits sites
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
    }

    let (max_connections, min_connections) = if in_memory {
        (1, 1)
    } else {
        (cfg.max_connections.max(1), 1)
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    // Read-mostly workload: keep hot pages in memory
    sqlx::query("PRAGMA cache_size = -16384")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA temp_store = MEMORY")
        .execute(&pool)
        .await?;

    let migrator = Migrator::new(Path::new(&cfg.migrations_path)).await?;
    migrator.run(&pool).await?;

    info!(
        url = %url,
        max_connections,
        migrations = %cfg.migrations_path,
        "Site directory pool ready"
    );

    Ok(pool)
}
