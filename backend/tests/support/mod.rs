//! Shared helpers for the Diesel adapter suites.
//!
//! Each test gets a fresh database on the shared embedded PostgreSQL cluster,
//! migrated with the embedded migrations. Async repository calls run on a
//! runtime owned by the [`Harness`] so tests stay synchronous `rstest`
//! functions.

pub mod cluster_skip;
pub mod seed;

use std::future::Future;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use electives::outbound::persistence::{DbPool, MIGRATIONS, PoolConfig};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use tokio::runtime::Runtime;

/// Migrated temporary database with a pool and a runtime to drive it.
pub struct Harness {
    runtime: Runtime,
    pool: DbPool,
    database_url: String,
    _database: TemporaryDatabase,
}

impl Harness {
    /// Provision a database and run every migration against it.
    pub fn start() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster_handle().map_err(|err| format!("{err:?}"))?;
        let database_name = format!("electives_test_{}", uuid::Uuid::new_v4().simple());
        let database = cluster
            .temporary_database(database_name.as_str())
            .map_err(|err| format!("create database: {err:?}"))?;
        let database_url = database.url().to_string();

        let mut conn = PgConnection::establish(&database_url).map_err(|err| err.to_string())?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| format!("migration: {err}"))?;

        let config = PoolConfig::new(database_url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            database_url,
            _database: database,
        })
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Drive `future` to completion on the harness runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Blocking connection for fixture rows.
    ///
    /// # Panics
    /// Panics when the database cannot be reached.
    pub fn connection(&self) -> PgConnection {
        PgConnection::establish(&self.database_url).expect("connect to test database")
    }
}
