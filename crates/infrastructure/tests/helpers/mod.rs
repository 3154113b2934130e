#![allow(dead_code)]

pub mod responses;

pub use responses::*;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

pub const MIGRATIONS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations");

/// In-memory directory with the real schema; one connection so every
/// session sees the same data.
pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    Migrator::new(Path::new(MIGRATIONS_PATH))
        .await
        .unwrap()
        .run(&pool)
        .await
        .unwrap();

    pool
}

pub async fn insert_site(
    pool: &SqlitePool,
    domain: &str,
    mail_server: Option<&str>,
    owner_id: i64,
    updated_at: &str,
) {
    sqlx::query(
        "INSERT INTO sites (domain_name, mail_server_name, owner_id, updated_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(domain)
    .bind(mail_server)
    .bind(owner_id)
    .bind(updated_at)
    .execute(pool)
    .await
    .unwrap();
}
