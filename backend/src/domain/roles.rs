//! Role lists attached to user accounts.
//!
//! Roles are free-form names persisted as one comma-joined string. Membership
//! checks trim each entry and compare case-insensitively, so `студент` and
//! `Студент` are the same role.

use std::fmt;

/// Role held by students choosing electives.
pub const STUDENT: &str = "Студент";
/// Role held by teaching staff.
pub const TEACHER: &str = "Преподаватель";
/// Role held by direction staff who manage assignments.
pub const DIRECTION_STAFF: &str = "Специалист дирекции";

/// Roles offered on the registration form, in display order.
pub const AVAILABLE_ROLES: [&str; 3] = [STUDENT, TEACHER, DIRECTION_STAFF];

fn normalise(role: &str) -> String {
    role.trim().to_lowercase()
}

/// Ordered set of role names.
///
/// ## Invariants
/// - Entries are trimmed and non-empty.
///
/// # Examples
/// ```
/// use electives::domain::RoleSet;
///
/// let roles = RoleSet::parse("Студент, Преподаватель");
/// assert!(roles.has_role("студент"));
/// assert_eq!(roles.to_storage().as_deref(), Some("Студент,Преподаватель"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<String>);

impl RoleSet {
    /// Parse the persisted comma-joined form. Blank entries are dropped.
    pub fn parse(raw: &str) -> Self {
        Self::from_list(raw.split(','))
    }

    /// Parse an optional persisted value; `None` yields an empty set.
    pub fn from_storage(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Build a set from individual names, trimming and dropping blanks.
    pub fn from_list<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            roles
                .into_iter()
                .map(|role| role.as_ref().trim().to_owned())
                .filter(|role| !role.is_empty())
                .collect(),
        )
    }

    /// Role names in stored order.
    pub fn roles(&self) -> &[String] {
        &self.0
    }

    /// Whether no role is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive membership test. Blank names never match.
    pub fn has_role(&self, role: &str) -> bool {
        let wanted = normalise(role);
        if wanted.is_empty() {
            return false;
        }
        self.0.iter().any(|held| normalise(held) == wanted)
    }

    /// Whether any of `roles` is held.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// Append `role` unless an equal role is already held.
    pub fn add_role(&mut self, role: &str) {
        let trimmed = role.trim();
        if trimmed.is_empty() || self.has_role(trimmed) {
            return;
        }
        self.0.push(trimmed.to_owned());
    }

    /// Drop every entry matching `role`.
    pub fn remove_role(&mut self, role: &str) {
        let unwanted = normalise(role);
        self.0.retain(|held| normalise(held) != unwanted);
    }

    /// Persisted form: comma-joined names, or `None` for an empty set.
    pub fn to_storage(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(","))
        }
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}
