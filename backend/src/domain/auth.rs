//! Login credentials.
//!
//! Handlers build [`LoginCredentials`] from raw form input before calling the
//! login port, so blank submissions never reach the user lookup.

use zeroize::Zeroizing;

/// Reasons a login form is rejected before authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Login was missing or blank once trimmed.
    #[error("login must not be empty")]
    EmptyLogin,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `login` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim; it is zeroed on drop.
///
/// # Examples
/// ```
/// use electives::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" petrova ", "secret").unwrap();
/// assert_eq!(creds.login(), "petrova");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    login: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw login/password inputs.
    pub fn try_from_parts(login: &str, password: &str) -> Result<Self, LoginValidationError> {
        let login = login.trim();
        if login.is_empty() {
            return Err(LoginValidationError::EmptyLogin);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            login: login.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyLogin)]
    #[case("   ", "pw", LoginValidationError::EmptyLogin)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn rejects_blank_inputs(
        #[case] login: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(login, password)
            .expect_err("blank inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("  sidorov ", " pass ").expect("valid");
        assert_eq!(creds.login(), "sidorov");
        assert_eq!(creds.password(), " pass ");
    }
}
