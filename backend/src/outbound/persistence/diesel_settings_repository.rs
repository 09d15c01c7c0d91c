//! PostgreSQL-backed `EnrollmentSettingsRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{EnrollmentSettingsError, EnrollmentSettingsRepository};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::pool::{DbPool, PoolError};
use super::schema::settings;

/// Diesel-backed settings adapter. Only the lowest-id row is consulted.
#[derive(Clone)]
pub struct DieselSettingsRepository {
    pool: DbPool,
}

impl DieselSettingsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentSettingsError {
    EnrollmentSettingsError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> EnrollmentSettingsError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => EnrollmentSettingsError::connection(message),
        DieselFailure::Query(message) => EnrollmentSettingsError::query(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. } => {
            EnrollmentSettingsError::query("constraint violated")
        }
    }
}

#[async_trait]
impl EnrollmentSettingsRepository for DieselSettingsRepository {
    async fn is_enrollment_open(&self) -> Result<bool, EnrollmentSettingsError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let open: Option<bool> = settings::table
            .order(settings::id.asc())
            .select(settings::is_enrollment_open)
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "read enrollment flag"))?;
        Ok(open.unwrap_or(false))
    }

    async fn set_enrollment_open(&self, open: bool) -> Result<(), EnrollmentSettingsError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let existing: Option<i32> = settings::table
                    .order(settings::id.asc())
                    .select(settings::id)
                    .first(conn)
                    .await
                    .optional()?;
                match existing {
                    Some(id) => {
                        diesel::update(settings::table.find(id))
                            .set(settings::is_enrollment_open.eq(open))
                            .execute(conn)
                            .await?;
                    }
                    None => {
                        diesel::insert_into(settings::table)
                            .values(settings::is_enrollment_open.eq(open))
                            .execute(conn)
                            .await?;
                    }
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(err, "set enrollment flag"))
    }
}
