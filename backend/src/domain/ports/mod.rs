//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing) are implemented by outbound
//! adapters; driving ports (`*Command`, [`LoginService`]) are implemented by
//! domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod direction_repository;
mod elective_course_repository;
mod elective_selection_command;
mod enrollment_admin_command;
mod enrollment_repository;
mod enrollment_settings_repository;
mod login_service;
mod password_hasher;
mod registration_command;
mod user_repository;

#[cfg(test)]
pub use direction_repository::MockDirectionRepository;
pub use direction_repository::{DirectionRepository, DirectionRepositoryError};
#[cfg(test)]
pub use elective_course_repository::MockElectiveCourseRepository;
pub use elective_course_repository::{ElectiveCourseRepository, ElectiveCourseRepositoryError};
pub use elective_selection_command::ElectiveSelectionCommand;
#[cfg(test)]
pub use elective_selection_command::MockElectiveSelectionCommand;
pub use enrollment_admin_command::EnrollmentAdminCommand;
#[cfg(test)]
pub use enrollment_admin_command::MockEnrollmentAdminCommand;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{AssignmentRecord, EnrollmentRepository, EnrollmentRepositoryError};
#[cfg(test)]
pub use enrollment_settings_repository::MockEnrollmentSettingsRepository;
pub use enrollment_settings_repository::{EnrollmentSettingsError, EnrollmentSettingsRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::RegistrationCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
