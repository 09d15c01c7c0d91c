//! Driving port for self-service account registration.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationError, RegistrationForm, RegistrationOptions, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Data the registration form needs to render.
    async fn options(&self) -> Result<RegistrationOptions, Error>;

    /// Validate `form` and create the account.
    async fn register(&self, form: RegistrationForm) -> Result<UserId, RegistrationError>;
}
