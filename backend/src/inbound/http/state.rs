//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ElectiveSelectionCommand, EnrollmentAdminCommand, LoginService, RegistrationCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub selection: Arc<dyn ElectiveSelectionCommand>,
    pub admin: Arc<dyn EnrollmentAdminCommand>,
}

impl HttpState {
    /// Construct state from the driving ports.
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn RegistrationCommand>,
        selection: Arc<dyn ElectiveSelectionCommand>,
        admin: Arc<dyn EnrollmentAdminCommand>,
    ) -> Self {
        Self {
            login,
            registration,
            selection,
            admin,
        }
    }
}
