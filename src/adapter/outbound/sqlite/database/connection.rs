//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for the local alert store.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}

/// Apply the pragmas used for alert writes.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(conn: &mut SqliteConnection) -> Result<()> {
    diesel::sql_query("PRAGMA busy_timeout=5000")
        .execute(conn)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    fn temp_pool() -> (tempfile::TempDir, DbPool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.db");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        (dir, pool)
    }

    #[test]
    fn run_migrations_creates_alerts_table() {
        let (_dir, pool) = temp_pool();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert!(tables.contains(&"alerts".to_string()));
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let (_dir, pool) = temp_pool();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
    }

    #[test]
    fn configure_sqlite_connection_applies() {
        let (_dir, pool) = temp_pool();
        let mut conn = pool.get().unwrap();
        assert!(configure_sqlite_connection(&mut conn).is_ok());
    }
}
