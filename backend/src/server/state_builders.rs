//! Wiring of Diesel adapters into the domain services behind `HttpState`.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use electives::domain::ports::{
    DirectionRepository, ElectiveCourseRepository, EnrollmentRepository,
    EnrollmentSettingsRepository, PasswordHasher, UserRepository,
};
use electives::domain::{
    ElectiveSelectionService, EnrollmentAdminService, PasswordLoginService, RegistrationService,
};
use electives::inbound::http::state::HttpState;
use electives::outbound::password::BcryptPasswordHasher;
use electives::outbound::persistence::{
    DieselDirectionRepository, DieselElectiveCourseRepository, DieselEnrollmentRepository,
    DieselSettingsRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build the HTTP state from the configured pool.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let pool = &config.db_pool;
    let users: Arc<dyn UserRepository> = Arc::new(DieselUserRepository::new(pool.clone()));
    let directions: Arc<dyn DirectionRepository> =
        Arc::new(DieselDirectionRepository::new(pool.clone()));
    let courses: Arc<dyn ElectiveCourseRepository> =
        Arc::new(DieselElectiveCourseRepository::new(pool.clone()));
    let enrollments: Arc<dyn EnrollmentRepository> =
        Arc::new(DieselEnrollmentRepository::new(pool.clone()));
    let settings: Arc<dyn EnrollmentSettingsRepository> =
        Arc::new(DieselSettingsRepository::new(pool.clone()));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    HttpState::new(
        Arc::new(PasswordLoginService::new(users.clone(), hasher.clone())),
        Arc::new(RegistrationService::new(
            users.clone(),
            directions.clone(),
            hasher,
            clock.clone(),
        )),
        Arc::new(ElectiveSelectionService::new(
            users.clone(),
            directions,
            courses.clone(),
            enrollments.clone(),
            settings.clone(),
            clock,
        )),
        Arc::new(EnrollmentAdminService::new(users, courses, enrollments, settings)),
    )
}
