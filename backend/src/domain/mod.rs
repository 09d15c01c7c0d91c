//! Domain primitives, services and ports.
//!
//! Purpose: model accounts, curricula and elective enrollments independently
//! of HTTP and storage. Inbound adapters talk to the services through the
//! driving ports in [`ports`]; services reach storage through the driven
//! ports.
//!
//! Public surface:
//! - [`User`], [`RoleSet`]: accounts and their comma-joined roles.
//! - [`Direction`], [`ElectiveCourse`], [`CoursePair`]: curriculum data.
//! - [`PasswordLoginService`], [`RegistrationService`],
//!   [`ElectiveSelectionService`], [`EnrollmentAdminService`]: use cases.
//! - [`Error`], [`ErrorCode`]: failures surfaced to adapters.

pub mod academic_calendar;
pub mod auth;
pub mod direction;
pub mod elective;
pub mod elective_selection;
pub mod enrollment_admin;
pub mod error;
pub mod login;
pub mod ports;
pub mod registration;
pub mod roles;
pub mod trace_id;
pub mod user;

pub use self::academic_calendar::{
    Term, admission_year_from_group, course_year_from_group, semester_for,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::direction::{Direction, DirectionId};
pub use self::elective::{CoursePair, ElectiveCourse, ElectiveCourseId, PAIR_SIZE, pair_courses};
pub use self::elective_selection::{
    ElectiveSelectionService, PairChoices, SelectionError, SelectionPage,
};
pub use self::enrollment_admin::{
    AdminOverview, AssignmentAction, AssignmentOutcome, AssignmentRequest, EnrollmentAdminService,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login::PasswordLoginService;
pub use self::registration::{
    RegistrationError, RegistrationForm, RegistrationOptions, RegistrationService,
};
pub use self::roles::{AVAILABLE_ROLES, DIRECTION_STAFF, RoleSet, STUDENT, TEACHER};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, StudentSummary, User, UserId};

/// Convenient handler result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use electives::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
