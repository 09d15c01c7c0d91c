//! PostgreSQL-backed `ElectiveCourseRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ElectiveCourseRepository, ElectiveCourseRepositoryError};
use crate::domain::{DirectionId, ElectiveCourse, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::ElectiveCourseRow;
use super::pool::{DbPool, PoolError};
use super::schema::{elective_course, student_elective_courses};

/// Diesel-backed implementation of the `ElectiveCourseRepository` port.
#[derive(Clone)]
pub struct DieselElectiveCourseRepository {
    pool: DbPool,
}

impl DieselElectiveCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ElectiveCourseRepositoryError {
    ElectiveCourseRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> ElectiveCourseRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => ElectiveCourseRepositoryError::connection(message),
        DieselFailure::Query(message) => ElectiveCourseRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. } => {
            ElectiveCourseRepositoryError::query("constraint violated")
        }
    }
}

fn into_courses(rows: Vec<ElectiveCourseRow>) -> Vec<ElectiveCourse> {
    rows.into_iter().map(ElectiveCourse::from).collect()
}

#[async_trait]
impl ElectiveCourseRepository for DieselElectiveCourseRepository {
    async fn list_for_semester(
        &self,
        direction: DirectionId,
        semester: i32,
    ) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ElectiveCourseRow> = elective_course::table
            .filter(elective_course::direction_id.eq(direction.get()))
            .filter(elective_course::semester.eq(semester))
            .order(elective_course::id.asc())
            .select(ElectiveCourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list courses for semester"))?;
        Ok(into_courses(rows))
    }

    async fn list_all(&self) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ElectiveCourseRow> = elective_course::table
            .order(elective_course::id.asc())
            .select(ElectiveCourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list courses"))?;
        Ok(into_courses(rows))
    }

    async fn list_chosen_by(
        &self,
        student: UserId,
    ) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ElectiveCourseRow> = elective_course::table
            .inner_join(student_elective_courses::table)
            .filter(student_elective_courses::user_id.eq(student.get()))
            .order(elective_course::id.asc())
            .select(ElectiveCourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list chosen courses"))?;
        Ok(into_courses(rows))
    }
}
