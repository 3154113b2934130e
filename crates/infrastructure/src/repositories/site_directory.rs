use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};
use std::sync::Arc;
use tenant_dns_application::ports::{BoxedSession, DirectorySession, SiteDirectory};
use tenant_dns_domain::{DomainError, SiteRecord};
use tracing::{error, instrument, trace};

type SiteRow = (String, Option<String>, i64);

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct SqliteSiteDirectory {
    pool: SqlitePool,
}

impl SqliteSiteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteDirectory for SqliteSiteDirectory {
    #[instrument(skip(self))]
    async fn open_session(&self) -> Result<BoxedSession, DomainError> {
        let conn = self.pool.acquire().await.map_err(|e| {
            error!(error = %e, "Failed to acquire directory connection");
            DomainError::DirectoryUnavailable(e.to_string())
        })?;
        trace!("Directory connection acquired");
        Ok(Box::new(SqliteDirectorySession { conn }))
    }
}

/// One pooled connection; returned to the pool on drop.
pub struct SqliteDirectorySession {
    conn: PoolConnection<Sqlite>,
}

impl SqliteDirectorySession {
    fn row_to_site(row: SiteRow) -> SiteRecord {
        let (domain_name, mail_server_name, owner_id) = row;

        SiteRecord {
            domain_name: Arc::from(domain_name.to_ascii_lowercase()),
            mail_server_name: mail_server_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(Arc::from),
            owner_id,
        }
    }
}

#[async_trait]
impl DirectorySession for SqliteDirectorySession {
    #[instrument(skip(self))]
    async fn find_exact(&mut self, domain: &str) -> Result<Option<SiteRecord>, DomainError> {
        let row = sqlx::query_as::<_, SiteRow>(
            "SELECT domain_name, mail_server_name, owner_id
             FROM sites WHERE domain_name = ?",
        )
        .bind(domain)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query site by domain");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Self::row_to_site))
    }

    /// Removals count as changes, so deleting or renaming the newest site
    /// never moves the answer backwards.
    #[instrument(skip(self))]
    async fn latest_change(&mut self, root_domain: &str) -> Result<Option<i64>, DomainError> {
        let latest: Option<String> = sqlx::query_scalar(
            "SELECT MAX(changed_at) FROM (
                 SELECT updated_at AS changed_at FROM sites
                 WHERE domain_name = ?1
                    OR substr(lower(domain_name), -length(?1) - 1) = '.' || ?1
                 UNION ALL
                 SELECT removed_at FROM site_removals
                 WHERE domain_name = ?1
                    OR substr(lower(domain_name), -length(?1) - 1) = '.' || ?1
             )",
        )
        .bind(root_domain)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query latest site change");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(latest.and_then(|value| parse_timestamp(&value)))
    }
}

fn parse_timestamp(value: &str) -> Option<i64> {
    match NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        Ok(ts) => Some(ts.and_utc().timestamp()),
        Err(e) => {
            error!(value, error = %e, "Unparseable site timestamp");
            None
        }
    }
}
