//! PostgreSQL-backed `DirectionRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DirectionRepository, DirectionRepositoryError};
use crate::domain::{Direction, DirectionId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::DirectionRow;
use super::pool::{DbPool, PoolError};
use super::schema::direction;

/// Diesel-backed implementation of the `DirectionRepository` port.
#[derive(Clone)]
pub struct DieselDirectionRepository {
    pool: DbPool,
}

impl DieselDirectionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DirectionRepositoryError {
    DirectionRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> DirectionRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => DirectionRepositoryError::connection(message),
        DieselFailure::Query(message) => DirectionRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. } => {
            DirectionRepositoryError::query("constraint violated")
        }
    }
}

#[async_trait]
impl DirectionRepository for DieselDirectionRepository {
    async fn list_all(&self) -> Result<Vec<Direction>, DirectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DirectionRow> = direction::table
            .order((direction::code.asc(), direction::year.asc(), direction::id.asc()))
            .select(DirectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list directions"))?;
        Ok(rows.into_iter().map(Direction::from).collect())
    }

    async fn find_by_id(
        &self,
        id: DirectionId,
    ) -> Result<Option<Direction>, DirectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DirectionRow> = direction::table
            .find(id.get())
            .select(DirectionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find direction"))?;
        Ok(row.map(Direction::from))
    }

    async fn find_by_code_and_year(
        &self,
        code: &str,
        year: i32,
    ) -> Result<Option<Direction>, DirectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DirectionRow> = direction::table
            .filter(direction::code.eq(code))
            .filter(direction::year.eq(year))
            .select(DirectionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find direction by code and year"))?;
        Ok(row.map(Direction::from))
    }
}
