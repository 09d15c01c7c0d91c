//! Account registration: form validation and curriculum resolution.
//!
//! Checks run in a fixed order and stop at the first failure, so the user
//! always sees the most fundamental problem with the submission first.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use zeroize::Zeroizing;

use super::academic_calendar::{MIN_ADMISSION_YEAR, admission_year_in_range, max_admission_year};
use super::ports::{
    DirectionRepository, PasswordHasher, RegistrationCommand, UserRepository, UserRepositoryError,
};
use super::roles::AVAILABLE_ROLES;
use super::{Direction, DirectionId, Error, ErrorCode, NewUser, RoleSet, UserId};

/// Raw registration form values as submitted.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub login: String,
    pub password: Zeroizing<String>,
    pub roles: Vec<String>,
    pub direction_id: Option<String>,
    pub group_number: Option<String>,
    pub admission_year: Option<String>,
}

/// Why a registration was refused. `Display` is the message shown to the
/// user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    #[error("select at least one role")]
    NoRoleSelected,
    #[error("full name, login and password are required")]
    MissingAccountFields,
    #[error("all fields are required for the student role")]
    MissingStudentFields,
    #[error("admission year must be a number")]
    AdmissionYearNotNumber,
    #[error("admission year must be between {min} and {max}")]
    AdmissionYearOutOfRange { min: i32, max: i32 },
    #[error("selected direction does not exist")]
    UnknownDirection,
    #[error("direction \"{direction}\" has no curriculum for {year}")]
    NoCurriculumForYear { direction: String, year: i32 },
    #[error("a user with this login already exists")]
    DuplicateLogin,
    #[error("failed to save the user: {0}")]
    Storage(Error),
}

impl RegistrationError {
    /// Error category used to pick the response status.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateLogin => ErrorCode::Conflict,
            Self::Storage(error) => error.code(),
            _ => ErrorCode::InvalidRequest,
        }
    }
}

impl From<Error> for RegistrationError {
    fn from(error: Error) -> Self {
        Self::Storage(error)
    }
}

/// Data shown on the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOptions {
    pub roles: Vec<String>,
    pub directions: Vec<Direction>,
    pub min_admission_year: i32,
    pub max_admission_year: i32,
}

/// Validated student-specific fields.
struct StudentDetails {
    direction: DirectionId,
    group_number: String,
    admission_year: i32,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Default [`RegistrationCommand`] implementation.
#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    directions: Arc<dyn DirectionRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        directions: Arc<dyn DirectionRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            directions,
            hasher,
            clock,
        }
    }

    async fn validate_student(
        &self,
        form: &RegistrationForm,
    ) -> Result<StudentDetails, RegistrationError> {
        let (Some(direction), Some(group), Some(year)) = (
            non_blank(form.direction_id.as_deref()),
            non_blank(form.group_number.as_deref()),
            non_blank(form.admission_year.as_deref()),
        ) else {
            return Err(RegistrationError::MissingStudentFields);
        };

        let year: i32 = year
            .parse()
            .map_err(|_| RegistrationError::AdmissionYearNotNumber)?;
        let today = self.clock.local().date_naive();
        if !admission_year_in_range(year, today) {
            return Err(RegistrationError::AdmissionYearOutOfRange {
                min: MIN_ADMISSION_YEAR,
                max: max_admission_year(today),
            });
        }

        let selected_id = direction
            .parse::<i32>()
            .map(DirectionId::new)
            .map_err(|_| RegistrationError::UnknownDirection)?;
        let selected = self
            .directions
            .find_by_id(selected_id)
            .await
            .map_err(Error::from)?
            .ok_or(RegistrationError::UnknownDirection)?;
        let curriculum = self
            .directions
            .find_by_code_and_year(&selected.code, year)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| RegistrationError::NoCurriculumForYear {
                direction: selected.name.clone(),
                year,
            })?;

        Ok(StudentDetails {
            direction: curriculum.id,
            group_number: group.to_owned(),
            admission_year: year,
        })
    }
}

#[async_trait]
impl RegistrationCommand for RegistrationService {
    async fn options(&self) -> Result<RegistrationOptions, Error> {
        let directions = self.directions.list_all().await?;
        Ok(RegistrationOptions {
            roles: AVAILABLE_ROLES.iter().map(|r| (*r).to_owned()).collect(),
            directions,
            min_admission_year: MIN_ADMISSION_YEAR,
            max_admission_year: max_admission_year(self.clock.local().date_naive()),
        })
    }

    async fn register(&self, form: RegistrationForm) -> Result<UserId, RegistrationError> {
        let roles = RoleSet::from_list(&form.roles);
        if roles.is_empty() {
            return Err(RegistrationError::NoRoleSelected);
        }
        let full_name = form.full_name.trim();
        let login = form.login.trim();
        if full_name.is_empty() || login.is_empty() || form.password.is_empty() {
            return Err(RegistrationError::MissingAccountFields);
        }

        let student = if roles.has_role(super::roles::STUDENT) {
            Some(self.validate_student(&form).await?)
        } else {
            None
        };

        if self
            .users
            .find_by_login(login)
            .await
            .map_err(Error::from)?
            .is_some()
        {
            return Err(RegistrationError::DuplicateLogin);
        }

        let password_hash = self
            .hasher
            .hash(&form.password)
            .await
            .map_err(Error::from)?;
        let (direction_id, group_number, admission_year) = match student {
            Some(details) => (
                Some(details.direction),
                Some(details.group_number),
                Some(details.admission_year),
            ),
            None => (None, None, None),
        };
        let record = NewUser {
            login: login.to_owned(),
            password_hash,
            full_name: full_name.to_owned(),
            roles,
            direction_id,
            group_number,
            admission_year,
        };

        let id = self.users.insert(&record).await.map_err(|error| match error {
            UserRepositoryError::DuplicateLogin { .. } => RegistrationError::DuplicateLogin,
            other => RegistrationError::Storage(other.into()),
        })?;
        info!(user_id = %id, roles = %record.roles, "user registered");
        Ok(id)
    }
}
