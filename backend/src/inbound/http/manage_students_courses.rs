//! Manual enrollment management for direction staff.
//!
//! ```text
//! GET  /manage_students_courses
//! POST /manage_students_courses  student=<id>&course=<id>&action=assign|remove
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::{AssignmentOutcome, AssignmentRequest, DIRECTION_STAFF, ErrorCode};

use super::auth::{require_role, require_user};
use super::form::FormFields;
use super::pages::{ManageStudentsCoursesPage, render, see_other};
use super::session::{FlashLevel, SessionContext};
use super::state::HttpState;
use super::{ApiResult, MANAGE_STUDENTS_COURSES_PATH};

#[get("/manage_students_courses")]
pub async fn manage_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session).await?;
    require_role(&user, DIRECTION_STAFF)?;
    let overview = state.admin.overview().await?;
    render(
        StatusCode::OK,
        &ManageStudentsCoursesPage::new(overview, session.take_flashes()),
    )
}

/// Assign or remove one enrollment, then redirect back to the overview.
#[post("/manage_students_courses")]
pub async fn apply_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormFields,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session).await?;
    require_role(&user, DIRECTION_STAFF)?;
    let request = AssignmentRequest {
        student: form.owned("student"),
        course: form.owned("course"),
        action: form.owned("action"),
    };

    match state.admin.apply(&request).await {
        Ok(AssignmentOutcome::Assigned) => {
            session.flash(FlashLevel::Success, "course assigned")?;
        }
        Ok(AssignmentOutcome::Removed { rows: 0 }) => {
            session.flash(FlashLevel::Info, "the student was not enrolled in this course")?;
        }
        Ok(AssignmentOutcome::Removed { .. }) => {
            session.flash(FlashLevel::Success, "course removed")?;
        }
        Ok(AssignmentOutcome::Ignored) => {}
        Err(error) if matches!(error.code(), ErrorCode::Conflict | ErrorCode::InvalidRequest) => {
            session.flash(
                FlashLevel::Error,
                format!("failed to save changes: {}", error.message()),
            )?;
        }
        Err(error) => return Err(error),
    }
    Ok(see_other(MANAGE_STUDENTS_COURSES_PATH))
}
