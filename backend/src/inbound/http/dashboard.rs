//! Landing pages after sign-in and the enrollment toggle.
//!
//! ```text
//! GET  /dashboard
//! GET  /director_dashboard    (direction staff)
//! POST /enrollment_settings   is_enrollment_open=true|false (direction staff)
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::{DIRECTION_STAFF, Error};

use super::auth::{require_role, require_user};
use super::form::FormFields;
use super::pages::{DashboardPage, DirectorDashboardPage, render, see_other};
use super::session::{FlashLevel, SessionContext};
use super::state::HttpState;
use super::{ApiResult, DIRECTOR_DASHBOARD_PATH};

#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session).await?;
    render(
        StatusCode::OK,
        &DashboardPage::for_user(&user, session.take_flashes()),
    )
}

#[get("/director_dashboard")]
pub async fn director_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session).await?;
    require_role(&user, DIRECTION_STAFF)?;
    let page = DirectorDashboardPage {
        flashes: session.take_flashes(),
        full_name: user.full_name().to_owned(),
        enrollment_open: state.admin.enrollment_open().await?,
    };
    render(StatusCode::OK, &page)
}

/// Unchecked checkboxes submit nothing, so an absent flag means closed.
fn parse_flag(raw: Option<&str>) -> Result<bool, Error> {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") | Some("off") => Ok(false),
        Some("true") | Some("1") | Some("on") => Ok(true),
        Some(_) => Err(Error::invalid_request("enrollment flag must be true or false")),
    }
}

#[post("/enrollment_settings")]
pub async fn enrollment_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormFields,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session).await?;
    require_role(&user, DIRECTION_STAFF)?;
    let open = parse_flag(form.get("is_enrollment_open"))?;
    state.admin.set_enrollment_open(open).await?;
    let message = if open {
        "enrollment is now open"
    } else {
        "enrollment is now closed"
    };
    session.flash(FlashLevel::Success, message)?;
    Ok(see_other(DIRECTOR_DASHBOARD_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{
        location, post_form, session_cookie, test_session_middleware,
    };
    use crate::test_support::{SEED_PASSWORD, SeededCampus};
    use actix_web::{App, test::{self}};
    use rstest::rstest;

    #[rstest]
    #[case(None, Ok(false))]
    #[case(Some("on"), Ok(true))]
    #[case(Some(" TRUE "), Ok(true))]
    #[case(Some("0"), Ok(false))]
    fn parses_enrollment_flag(#[case] raw: Option<&str>, #[case] expected: Result<bool, ()>) {
        assert_eq!(parse_flag(raw).map_err(|_| ()), expected);
    }

    #[test]
    fn rejects_unknown_flag_values() {
        assert!(parse_flag(Some("maybe")).is_err());
    }

    #[rstest]
    #[case("ivanova", StatusCode::FORBIDDEN)]
    #[case("petrov", StatusCode::FORBIDDEN)]
    #[case("sidorova", StatusCode::OK)]
    #[actix_web::test]
    async fn director_dashboard_is_staff_only(#[case] login: &str, #[case] status: StatusCode) {
        let campus = SeededCampus::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(campus.http_state()))
                .wrap(test_session_middleware())
                .configure(configure),
        )
        .await;
        let res = test::call_service(
            &app,
            post_form("/login", &[("login", login), ("password", SEED_PASSWORD)]).to_request(),
        )
        .await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/director_dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), status);
    }

    #[actix_web::test]
    async fn staff_can_close_enrollment() {
        let campus = SeededCampus::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(campus.http_state()))
                .wrap(test_session_middleware())
                .configure(configure),
        )
        .await;
        let res = test::call_service(
            &app,
            post_form("/login", &[("login", "sidorova"), ("password", SEED_PASSWORD)])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            post_form("/enrollment_settings", &[("is_enrollment_open", "false")])
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), DIRECTOR_DASHBOARD_PATH);
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/director_dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let html = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8");
        assert!(html.contains("enrollment is now closed"));
        assert!(html.contains("Enrollment is closed."));
    }

    #[actix_web::test]
    async fn dashboard_links_follow_roles() {
        let campus = SeededCampus::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(campus.http_state()))
                .wrap(test_session_middleware())
                .configure(configure),
        )
        .await;
        let res = test::call_service(
            &app,
            post_form("/login", &[("login", "ivanova"), ("password", SEED_PASSWORD)])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&res);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/dashboard").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8");
        assert!(html.contains("Ivanova Anna"));
        assert!(html.contains("/student_courses"));
        assert!(!html.contains("/manage_students_courses"));
    }
}
