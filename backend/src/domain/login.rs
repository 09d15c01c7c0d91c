//! Password-based implementation of the [`LoginService`] port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{LoginService, PasswordHasher, UserRepository};
use super::{Error, LoginCredentials, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid login or password";

/// Authenticates against stored password hashes.
#[derive(Clone)]
pub struct PasswordLoginService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl PasswordLoginService {
    /// Create a service backed by the given repository and hasher.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl LoginService for PasswordLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self.users.find_by_login(credentials.login()).await? else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = match self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
        {
            Ok(matches) => matches,
            Err(error) => {
                warn!(user_id = %user.id(), %error, "stored password hash is unusable");
                false
            }
        };
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id(), "user logged in");
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        Ok(self.users.find_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for credential checks and error mapping.
    use super::*;
    use crate::domain::ports::{
        MockPasswordHasher, MockUserRepository, PasswordHashError, UserRepositoryError,
    };
    use crate::domain::{ErrorCode, NewUser, RoleSet};
    use rstest::rstest;

    fn stored_user() -> User {
        User::from_record(
            UserId::new(5),
            NewUser {
                login: "petrova".to_owned(),
                password_hash: "stored-hash".to_owned(),
                full_name: "Петрова Анна".to_owned(),
                roles: RoleSet::parse("Студент"),
                direction_id: None,
                group_number: None,
                admission_year: None,
            },
        )
    }

    fn credentials(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("petrova", password).expect("valid credentials")
    }

    fn repository_with_user() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_login()
            .withf(|login| login == "petrova")
            .returning(|_| Ok(Some(stored_user())));
        users
    }

    fn hasher_returning(result: Result<bool, PasswordHashError>) -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .returning(move |_, _| result.clone());
        hasher
    }

    #[tokio::test]
    async fn authenticates_matching_password() {
        let service = PasswordLoginService::new(
            Arc::new(repository_with_user()),
            Arc::new(hasher_returning(Ok(true))),
        );
        let user = service
            .authenticate(&credentials("secret"))
            .await
            .expect("credentials match");
        assert_eq!(user.id(), UserId::new(5));
    }

    #[rstest]
    #[case(Ok(false))]
    #[case(Err(PasswordHashError::verify("invalid salt")))]
    #[tokio::test]
    async fn rejects_wrong_or_unverifiable_password(#[case] outcome: Result<bool, PasswordHashError>) {
        let service = PasswordLoginService::new(
            Arc::new(repository_with_user()),
            Arc::new(hasher_returning(outcome)),
        );
        let err = service
            .authenticate(&credentials("wrong"))
            .await
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn unknown_login_matches_wrong_password_error() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_login().returning(|_| Ok(None));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().never();
        let service = PasswordLoginService::new(Arc::new(users), Arc::new(hasher));

        let err = service
            .authenticate(&credentials("secret"))
            .await
            .expect_err("unknown login");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn connection_failures_surface_as_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_login()
            .returning(|_| Err(UserRepositoryError::connection("pool exhausted")));
        let service = PasswordLoginService::new(Arc::new(users), Arc::new(MockPasswordHasher::new()));

        let err = service
            .authenticate(&credentials("secret"))
            .await
            .expect_err("repository failure");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn find_user_returns_missing_as_none() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let service = PasswordLoginService::new(Arc::new(users), Arc::new(MockPasswordHasher::new()));
        assert!(service.find_user(UserId::new(1)).await.expect("query ok").is_none());
    }
}
