//! Authentication and role gates used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! session-to-user resolution and role checks here.

use tracing::info;

use crate::domain::{Error, User};

use super::session::SessionContext;
use super::state::HttpState;

/// Load the signed-in user.
///
/// A session pointing at a user that no longer exists is purged so the
/// client starts over at the login page.
pub async fn require_user(state: &HttpState, session: &SessionContext) -> Result<User, Error> {
    let Some(user_id) = session.user_id() else {
        return Err(Error::unauthorized("login required"));
    };
    match state.login.find_user(user_id).await? {
        Some(user) => Ok(user),
        None => {
            info!(%user_id, "session refers to a missing user");
            session.purge();
            Err(Error::unauthorized("login required"))
        }
    }
}

/// Fail with `Forbidden` unless `user` holds `role`.
pub fn require_role(user: &User, role: &str) -> Result<(), Error> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(Error::forbidden("you do not have access to this page"))
    }
}
