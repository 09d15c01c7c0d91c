//! Port for reading elective courses.
use async_trait::async_trait;

use crate::domain::{DirectionId, ElectiveCourse, Error, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by elective course repository adapters.
    pub enum ElectiveCourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "course repository query failed: {message}",
    }
}

impl From<ElectiveCourseRepositoryError> for Error {
    fn from(error: ElectiveCourseRepositoryError) -> Self {
        match error {
            ElectiveCourseRepositoryError::Connection { message } => {
                Error::service_unavailable(message)
            }
            ElectiveCourseRepositoryError::Query { message } => Error::internal(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ElectiveCourseRepository: Send + Sync {
    /// Courses of `direction` taught in `semester`, in ascending id order.
    async fn list_for_semester(
        &self,
        direction: DirectionId,
        semester: i32,
    ) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError>;

    /// Every course, in ascending id order.
    async fn list_all(&self) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError>;

    /// Courses `student` is currently enrolled in.
    async fn list_chosen_by(
        &self,
        student: UserId,
    ) -> Result<Vec<ElectiveCourse>, ElectiveCourseRepositoryError>;
}
