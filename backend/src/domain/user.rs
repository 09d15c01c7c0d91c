//! User accounts.

use std::fmt;

use super::direction::DirectionId;
use super::roles::{RoleSet, STUDENT};

/// Database identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    login: String,
    password_hash: String,
    full_name: String,
    roles: RoleSet,
    direction_id: Option<DirectionId>,
    group_number: Option<String>,
    admission_year: Option<i32>,
}

impl User {
    /// Assemble a user from an existing record.
    pub fn from_record(id: UserId, record: NewUser) -> Self {
        let NewUser {
            login,
            password_hash,
            full_name,
            roles,
            direction_id,
            group_number,
            admission_year,
        } = record;
        Self {
            id,
            login,
            password_hash,
            full_name,
            roles,
            direction_id,
            group_number,
            admission_year,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Stored password hash (bcrypt in production).
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Case-insensitive role membership.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.has_role(role)
    }

    /// Whether the user holds the student role.
    pub fn is_student(&self) -> bool {
        self.has_role(STUDENT)
    }

    pub fn direction_id(&self) -> Option<DirectionId> {
        self.direction_id
    }

    /// Group label such as `2131`; the first two characters encode the
    /// admission year and the third the course year.
    pub fn group_number(&self) -> Option<&str> {
        self.group_number.as_deref()
    }

    pub fn admission_year(&self) -> Option<i32> {
        self.admission_year
    }

    /// Record an inferred admission year.
    pub fn set_admission_year(&mut self, year: i32) {
        self.admission_year = Some(year);
    }
}

/// Account data for an insert; the database assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub password_hash: String,
    pub full_name: String,
    pub roles: RoleSet,
    pub direction_id: Option<DirectionId>,
    pub group_number: Option<String>,
    pub admission_year: Option<i32>,
}

/// Minimal student projection used on the staff pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: UserId,
    pub full_name: String,
}

impl From<&User> for StudentSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            full_name: user.full_name().to_owned(),
        }
    }
}
