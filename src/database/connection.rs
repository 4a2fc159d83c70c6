use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

use super::setup;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

/// Open a pool against `database_path` and make sure the schema exists.
/// Every entry point (server, processing, tests) gets a ready database.
pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create database connection pool")?;

    let mut conn = get_connection(&pool)?;
    setup::initialize_database(&mut conn)?;

    Ok(pool)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
