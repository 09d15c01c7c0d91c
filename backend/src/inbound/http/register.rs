//! Account registration form.
//!
//! ```text
//! GET  /register
//! POST /register  fio, login, password, roles (repeated), direction,
//!                 group_number, admission_year
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::{RegistrationError, RegistrationForm};

use super::error::status_for;
use super::form::FormFields;
use super::pages::{RegisterPage, render, see_other};
use super::session::{FlashLevel, SessionContext};
use super::state::HttpState;
use super::{ApiResult, LOGIN_PATH};

impl From<&FormFields> for RegistrationForm {
    fn from(form: &FormFields) -> Self {
        Self {
            full_name: form.get("fio").unwrap_or_default().to_owned(),
            login: form.get("login").unwrap_or_default().to_owned(),
            password: Zeroizing::new(form.get("password").unwrap_or_default().to_owned()),
            roles: form.get_all("roles"),
            direction_id: form.owned("direction"),
            group_number: form.owned("group_number"),
            admission_year: form.owned("admission_year"),
        }
    }
}

#[get("/register")]
pub async fn register_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let options = state.registration.options().await?;
    render(
        StatusCode::OK,
        &RegisterPage::new(options, session.take_flashes()),
    )
}

/// Create an account; failures re-render the form with the entered values.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormFields,
) -> ApiResult<HttpResponse> {
    let submitted = RegistrationForm::from(&form);
    let error = match state.registration.register(submitted.clone()).await {
        Ok(_) => {
            session.flash(FlashLevel::Success, "registration complete, you can now log in")?;
            return Ok(see_other(LOGIN_PATH));
        }
        Err(error) => error,
    };

    let message = match &error {
        RegistrationError::Storage(cause) => {
            warn!(error = %cause, "registration failed to save");
            "failed to save the user, please try again".to_owned()
        }
        other => other.to_string(),
    };
    let options = state.registration.options().await?;
    let page = RegisterPage::refill(options, &submitted, Some(message), session.take_flashes());
    render(status_for(error.code()), &page)
}
