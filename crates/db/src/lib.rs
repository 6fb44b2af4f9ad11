//! Persistence layer: connection pool, the unit-of-work store, a generic
//! entity repository and the row models it operates on.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod query;
pub mod repositories;
pub mod unit_of_work;

pub use error::classify;
pub use repositories::{Created, Entity, Repository};
pub use unit_of_work::{ScopeState, UnitOfWork};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply every pending migration under `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
