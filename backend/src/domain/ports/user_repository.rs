//! Port for user account persistence.
use async_trait::async_trait;

use crate::domain::{Error, NewUser, StudentSummary, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The login is already registered.
        DuplicateLogin { login: String } => "login {login} is already registered",
    }
}

impl From<UserRepositoryError> for Error {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::Connection { message } => Error::service_unavailable(message),
            UserRepositoryError::Query { message } => Error::internal(message),
            UserRepositoryError::DuplicateLogin { .. } => {
                Error::conflict("a user with this login already exists")
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by login (exact match).
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new account and return its identifier.
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserRepositoryError>;

    /// Persist an inferred admission year.
    async fn set_admission_year(&self, id: UserId, year: i32) -> Result<(), UserRepositoryError>;

    /// Users holding the student role, ordered by full name.
    async fn list_students(&self) -> Result<Vec<StudentSummary>, UserRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserRepositoryError::query("bad sql"), ErrorCode::InternalError)]
    #[case(UserRepositoryError::duplicate_login("ivanov"), ErrorCode::Conflict)]
    fn maps_to_domain_codes(#[case] error: UserRepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }
}
