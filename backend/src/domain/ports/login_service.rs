//! Driving port for login and session identity.
//!
//! Inbound adapters authenticate credentials and resolve the session user
//! through this port without importing persistence or hashing adapters.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown logins and wrong passwords yield the same
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized)
    /// error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Load the user a session points at, if it still exists.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;
}
