//! Driving port for direction staff managing enrollments.

use async_trait::async_trait;

use crate::domain::{AdminOverview, AssignmentOutcome, AssignmentRequest, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentAdminCommand: Send + Sync {
    /// Students, courses, current assignments and the enrollment flag.
    async fn overview(&self) -> Result<AdminOverview, Error>;

    /// Assign or remove a single enrollment.
    async fn apply(&self, request: &AssignmentRequest) -> Result<AssignmentOutcome, Error>;

    /// Current state of the enrollment flag.
    async fn enrollment_open(&self) -> Result<bool, Error>;

    /// Open or close enrollment.
    async fn set_enrollment_open(&self, open: bool) -> Result<(), Error>;
}
