//! Port for enrollment rows (student x elective course).
use async_trait::async_trait;

use crate::domain::{ElectiveCourseId, Error, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "enrollment repository query failed: {message}",
        /// The (student, course) row already exists.
        Duplicate { message: String } => "enrollment already exists: {message}",
        /// The student or course does not exist.
        MissingReference { message: String } => "enrollment references a missing row: {message}",
    }
}

impl From<EnrollmentRepositoryError> for Error {
    fn from(error: EnrollmentRepositoryError) -> Self {
        match error {
            EnrollmentRepositoryError::Connection { message } => Error::service_unavailable(message),
            EnrollmentRepositoryError::Query { message } => Error::internal(message),
            EnrollmentRepositoryError::Duplicate { .. } => {
                Error::conflict("the student is already enrolled in this course")
            }
            EnrollmentRepositoryError::MissingReference { .. } => {
                Error::invalid_request("unknown student or course")
            }
        }
    }
}

/// One enrollment joined with display names for the staff overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub student_id: UserId,
    pub student_name: String,
    pub course_id: ElectiveCourseId,
    pub course_name: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Delete every enrollment of `student` and insert `courses`, atomically.
    async fn replace_for_student(
        &self,
        student: UserId,
        courses: &[ElectiveCourseId],
    ) -> Result<(), EnrollmentRepositoryError>;

    /// Delete every enrollment of `student`; returns the number removed.
    async fn delete_for_student(&self, student: UserId) -> Result<usize, EnrollmentRepositoryError>;

    /// Insert a single enrollment without prior checks.
    async fn assign(
        &self,
        student: UserId,
        course: ElectiveCourseId,
    ) -> Result<(), EnrollmentRepositoryError>;

    /// Delete a single enrollment; returns the number removed (0 or 1).
    async fn remove(
        &self,
        student: UserId,
        course: ElectiveCourseId,
    ) -> Result<usize, EnrollmentRepositoryError>;

    /// All enrollments ordered by student name.
    async fn list_assignments(&self) -> Result<Vec<AssignmentRecord>, EnrollmentRepositoryError>;
}
