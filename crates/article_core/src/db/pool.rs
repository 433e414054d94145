//! Pooled SQLite connections for the HTTP server.
//!
//! # Responsibility
//! - Build an `r2d2` pool over one database file.
//! - Run schema migrations once, before the pool is handed out.
//!
//! # Invariants
//! - Every pooled connection goes through `configure_connection`.
//! - In-memory pools hold exactly one connection that is never reaped, so
//!   every checkout sees the same database for the life of the pool.

use super::migrations::apply_migrations;
use super::open::{configure_connection, BUSY_TIMEOUT};
use super::{DbError, DbResult};
use log::{error, info};
use r2d2::{Builder, Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Instant;

/// Shared pool handle; cheap to clone.
pub type DbPool = Pool<SqliteConnectionManager>;

/// One connection checked out of a [`DbPool`].
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Opens a pool over a SQLite database file and applies pending migrations.
///
/// `max_size` is clamped to at least one connection.
pub fn open_pool(path: impl AsRef<Path>, max_size: u32) -> DbResult<DbPool> {
    let builder = Pool::builder().max_size(max_size.max(1));
    build_pool("file", SqliteConnectionManager::file(path), builder)
}

/// Opens a single-connection pool over a private in-memory database.
///
/// The connection holds the only copy of the data, so it is exempt from
/// lifetime and idle reaping.
pub fn open_pool_in_memory() -> DbResult<DbPool> {
    let builder = Pool::builder()
        .max_size(1)
        .max_lifetime(None)
        .idle_timeout(None);
    build_pool("memory", SqliteConnectionManager::memory(), builder)
}

fn build_pool(
    mode: &str,
    manager: SqliteConnectionManager,
    builder: Builder<SqliteConnectionManager>,
) -> DbResult<DbPool> {
    let started_at = Instant::now();
    info!("event=db_pool_open module=db status=start mode={mode}");

    let result = builder
        .connection_timeout(BUSY_TIMEOUT)
        .build(manager.with_init(|conn| configure_connection(conn)))
        .map_err(DbError::from)
        .and_then(|pool| {
            let mut conn = pool.get()?;
            apply_migrations(&mut conn)?;
            drop(conn);
            Ok(pool)
        });

    match result {
        Ok(pool) => {
            info!(
                "event=db_pool_open module=db status=ok mode={mode} max_size={} duration_ms={}",
                pool.max_size(),
                started_at.elapsed().as_millis()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_pool_open module=db status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
