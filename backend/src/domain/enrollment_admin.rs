//! Manual enrollment management for direction staff.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{
    AssignmentRecord, ElectiveCourseRepository, EnrollmentAdminCommand, EnrollmentRepository,
    EnrollmentSettingsRepository, UserRepository,
};
use super::{ElectiveCourse, ElectiveCourseId, Error, StudentSummary, UserId};

/// Operation requested on the staff form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentAction {
    Assign,
    Remove,
}

impl AssignmentAction {
    /// Parse the form's `action` value; unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "assign" => Some(Self::Assign),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

/// Raw values of the staff assignment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentRequest {
    pub student: Option<String>,
    pub course: Option<String>,
    pub action: Option<String>,
}

/// What an assignment request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned,
    Removed { rows: usize },
    /// Incomplete form or unknown action; nothing changed.
    Ignored,
}

/// Data for the staff management page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminOverview {
    pub students: Vec<StudentSummary>,
    pub courses: Vec<ElectiveCourse>,
    pub assignments: Vec<AssignmentRecord>,
    pub enrollment_open: bool,
}

fn parse_id(raw: &str) -> Result<i32, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid_request("unknown student or course"))
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Default [`EnrollmentAdminCommand`] implementation.
#[derive(Clone)]
pub struct EnrollmentAdminService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn ElectiveCourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    settings: Arc<dyn EnrollmentSettingsRepository>,
}

impl EnrollmentAdminService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn ElectiveCourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        settings: Arc<dyn EnrollmentSettingsRepository>,
    ) -> Self {
        Self {
            users,
            courses,
            enrollments,
            settings,
        }
    }
}

#[async_trait]
impl EnrollmentAdminCommand for EnrollmentAdminService {
    async fn overview(&self) -> Result<AdminOverview, Error> {
        Ok(AdminOverview {
            students: self.users.list_students().await?,
            courses: self.courses.list_all().await?,
            assignments: self.enrollments.list_assignments().await?,
            enrollment_open: self.settings.is_enrollment_open().await?,
        })
    }

    async fn apply(&self, request: &AssignmentRequest) -> Result<AssignmentOutcome, Error> {
        let (Some(student), Some(course), Some(action)) = (
            present(request.student.as_ref()),
            present(request.course.as_ref()),
            present(request.action.as_ref()),
        ) else {
            return Ok(AssignmentOutcome::Ignored);
        };
        let Some(action) = AssignmentAction::parse(action) else {
            return Ok(AssignmentOutcome::Ignored);
        };
        let student = UserId::new(parse_id(student)?);
        let course = ElectiveCourseId::new(parse_id(course)?);

        match action {
            AssignmentAction::Assign => {
                self.enrollments.assign(student, course).await?;
                info!(user_id = %student, course_id = %course, "enrollment assigned by staff");
                Ok(AssignmentOutcome::Assigned)
            }
            AssignmentAction::Remove => {
                let rows = self.enrollments.remove(student, course).await?;
                info!(user_id = %student, course_id = %course, rows, "enrollment removed by staff");
                Ok(AssignmentOutcome::Removed { rows })
            }
        }
    }

    async fn enrollment_open(&self) -> Result<bool, Error> {
        Ok(self.settings.is_enrollment_open().await?)
    }

    async fn set_enrollment_open(&self, open: bool) -> Result<(), Error> {
        self.settings.set_enrollment_open(open).await?;
        info!(open, "enrollment flag changed");
        Ok(())
    }
}
