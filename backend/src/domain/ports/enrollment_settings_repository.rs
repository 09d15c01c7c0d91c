//! Port for the global enrollment switch.
use async_trait::async_trait;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by settings repository adapters.
    pub enum EnrollmentSettingsError {
        /// Repository connection could not be established.
        Connection { message: String } => "settings repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "settings repository query failed: {message}",
    }
}

impl From<EnrollmentSettingsError> for Error {
    fn from(error: EnrollmentSettingsError) -> Self {
        match error {
            EnrollmentSettingsError::Connection { message } => Error::service_unavailable(message),
            EnrollmentSettingsError::Query { message } => Error::internal(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentSettingsRepository: Send + Sync {
    /// Whether students may currently cancel their choice. Absent settings
    /// read as closed.
    async fn is_enrollment_open(&self) -> Result<bool, EnrollmentSettingsError>;

    /// Open or close enrollment, creating the settings row if needed.
    async fn set_enrollment_open(&self, open: bool) -> Result<(), EnrollmentSettingsError>;
}
