//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, StudentSummary, User, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> UserRepositoryError {
    map_failure(classify_diesel_error(error, operation))
}

fn map_failure(failure: DieselFailure) -> UserRepositoryError {
    match failure {
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::UniqueViolation { .. } => UserRepositoryError::query("unique constraint violated"),
        DieselFailure::ForeignKeyViolation { .. } => {
            UserRepositoryError::query("referenced direction does not exist")
        }
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by id"))?;
        Ok(row.map(User::from))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::login.eq(login))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by login"))?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, user: &NewUser) -> Result<UserId, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i32 = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(err, "insert user") {
                DieselFailure::UniqueViolation { .. } => {
                    UserRepositoryError::duplicate_login(user.login.as_str())
                }
                other => map_failure(other),
            })?;
        Ok(UserId::new(id))
    }

    async fn set_admission_year(&self, id: UserId, year: i32) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(users::table.find(id.get()))
            .set(users::admission_year.eq(Some(year)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "set admission year"))?;
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<StudentSummary>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            // Cyrillic case folding in SQL depends on the collation, so the
            // role match runs on the loaded rows.
            .filter(users::role.is_not_null())
            .order((users::fio.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list students"))?;
        Ok(rows
            .into_iter()
            .map(User::from)
            .filter(User::is_student)
            .map(|user| StudentSummary::from(&user))
            .collect())
    }
}
