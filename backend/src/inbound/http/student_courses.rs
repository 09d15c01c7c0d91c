//! Elective selection for students.
//!
//! ```text
//! GET  /student_courses
//! POST /student_courses     pair_0=<course id>&pair_1=<course id>...
//! POST /cancel_enrollment
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::SelectionError;

use super::auth::require_user;
use super::form::FormFields;
use super::pages::{ChooseCoursesPage, render, see_other};
use super::session::{FlashLevel, SessionContext};
use super::state::HttpState;
use super::{ApiResult, DASHBOARD_PATH, STUDENT_COURSES_PATH};

/// Turn a refused selection request into a redirect with a flash message.
fn redirect_for(session: &SessionContext, error: SelectionError) -> ApiResult<HttpResponse> {
    let target = match &error {
        SelectionError::NotStudent => return Ok(see_other(DASHBOARD_PATH)),
        SelectionError::Storage(cause) => return Err(cause.clone()),
        SelectionError::NoCurriculum => DASHBOARD_PATH,
        SelectionError::MissingChoice { .. }
        | SelectionError::InvalidChoice { .. }
        | SelectionError::EnrollmentClosed => STUDENT_COURSES_PATH,
    };
    session.flash(FlashLevel::Error, error.to_string())?;
    Ok(see_other(target))
}

#[get("/student_courses")]
pub async fn choose_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session).await?;
    match state.selection.selection_page(&user).await {
        Ok(page) => render(
            StatusCode::OK,
            &ChooseCoursesPage::new(page, session.take_flashes()),
        ),
        Err(error) => redirect_for(&session, error),
    }
}

/// Replace the student's choices with one course per pair.
#[post("/student_courses")]
pub async fn submit_choices(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormFields,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session).await?;
    match state.selection.submit(&user, &form.pair_choices()).await {
        Ok(_) => {
            session.flash(FlashLevel::Success, "your choice has been saved")?;
            Ok(see_other(STUDENT_COURSES_PATH))
        }
        Err(error) => redirect_for(&session, error),
    }
}

#[post("/cancel_enrollment")]
pub async fn cancel_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session).await?;
    match state.selection.cancel(&user).await {
        Ok(_) => {
            session.flash(
                FlashLevel::Success,
                "all selected courses were cancelled, you can choose again",
            )?;
            Ok(see_other(STUDENT_COURSES_PATH))
        }
        Err(error) => redirect_for(&session, error),
    }
}
