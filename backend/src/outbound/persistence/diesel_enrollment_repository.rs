//! PostgreSQL-backed `EnrollmentRepository` implementation.
//!
//! Student self-service replaces all rows inside one transaction. Staff
//! assignments use plain parameterised statements and rely on the table's
//! unique and foreign key constraints for validation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{AssignmentRecord, EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{ElectiveCourseId, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{AssignmentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::student_elective_courses;

const ASSIGN_SQL: &str =
    "INSERT INTO student_elective_courses (user_id, elective_course_id) VALUES ($1, $2)";
const REMOVE_SQL: &str =
    "DELETE FROM student_elective_courses WHERE user_id = $1 AND elective_course_id = $2";
const LIST_ASSIGNMENTS_SQL: &str = "\
    SELECT u.id AS user_id, u.fio, c.id AS course_id, c.name AS course_name \
    FROM student_elective_courses s \
    JOIN users u ON u.id = s.user_id \
    JOIN elective_course c ON c.id = s.elective_course_id \
    ORDER BY u.fio, u.id, c.name";

/// Diesel-backed implementation of the `EnrollmentRepository` port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    EnrollmentRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> EnrollmentRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => EnrollmentRepositoryError::connection(message),
        DieselFailure::Query(message) => EnrollmentRepositoryError::query(message),
        DieselFailure::UniqueViolation { constraint } => EnrollmentRepositoryError::duplicate(
            constraint.unwrap_or_else(|| "student_elective_courses_unique".to_owned()),
        ),
        DieselFailure::ForeignKeyViolation { constraint } => {
            EnrollmentRepositoryError::missing_reference(
                constraint.unwrap_or_else(|| "unknown constraint".to_owned()),
            )
        }
    }
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn replace_for_student(
        &self,
        student: UserId,
        courses: &[ElectiveCourseId],
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewEnrollmentRow> = courses
            .iter()
            .map(|course| NewEnrollmentRow {
                user_id: student.get(),
                elective_course_id: course.get(),
            })
            .collect();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(
                    student_elective_courses::table
                        .filter(student_elective_courses::user_id.eq(student.get())),
                )
                .execute(conn)
                .await?;
                if !rows.is_empty() {
                    diesel::insert_into(student_elective_courses::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(err, "replace enrollments"))
    }

    async fn delete_for_student(&self, student: UserId) -> Result<usize, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            student_elective_courses::table
                .filter(student_elective_courses::user_id.eq(student.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "delete enrollments"))
    }

    async fn assign(
        &self,
        student: UserId,
        course: ElectiveCourseId,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query(ASSIGN_SQL)
            .bind::<Integer, _>(student.get())
            .bind::<Integer, _>(course.get())
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "assign enrollment"))?;
        Ok(())
    }

    async fn remove(
        &self,
        student: UserId,
        course: ElectiveCourseId,
    ) -> Result<usize, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query(REMOVE_SQL)
            .bind::<Integer, _>(student.get())
            .bind::<Integer, _>(course.get())
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "remove enrollment"))
    }

    async fn list_assignments(&self) -> Result<Vec<AssignmentRecord>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssignmentRow> = diesel::sql_query(LIST_ASSIGNMENTS_SQL)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list assignments"))?;
        Ok(rows.into_iter().map(AssignmentRecord::from).collect())
    }
}
