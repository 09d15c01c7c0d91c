//! Sign-in, sign-out and the index redirect.
//!
//! ```text
//! GET  /        -> /dashboard or /login
//! GET  /login
//! POST /login   login=<login>&password=<password>
//! GET  /logout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::{ErrorCode, LoginCredentials};

use super::auth::require_user;
use super::form::FormFields;
use super::pages::{LoginPage, render, see_other};
use super::session::{Flash, FlashLevel, SessionContext};
use super::state::HttpState;
use super::{ApiResult, DASHBOARD_PATH, LOGIN_PATH};

#[get("/")]
pub async fn index(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    require_user(&state, &session).await?;
    Ok(see_other(DASHBOARD_PATH))
}

#[get("/login")]
pub async fn login_page(session: SessionContext) -> ApiResult<HttpResponse> {
    let page = LoginPage {
        flashes: session.take_flashes(),
        login: String::new(),
    };
    render(StatusCode::OK, &page)
}

/// Authenticate and establish a session.
///
/// Failed attempts re-render the form with the submitted login.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormFields,
) -> ApiResult<HttpResponse> {
    let login = form.get("login").unwrap_or_default();
    let password = form.get("password").unwrap_or_default();

    let credentials = match LoginCredentials::try_from_parts(login, password) {
        Ok(credentials) => credentials,
        Err(error) => {
            return rerender(&session, login, StatusCode::BAD_REQUEST, error.to_string());
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            Ok(see_other(DASHBOARD_PATH))
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => rerender(
            &session,
            login,
            StatusCode::UNAUTHORIZED,
            error.message().to_owned(),
        ),
        Err(error) => Err(error),
    }
}

fn rerender(
    session: &SessionContext,
    submitted_login: &str,
    status: StatusCode,
    message: String,
) -> ApiResult<HttpResponse> {
    let mut flashes = session.take_flashes();
    flashes.push(Flash {
        level: FlashLevel::Error,
        message,
    });
    let page = LoginPage {
        flashes,
        login: submitted_login.trim().to_owned(),
    };
    render(status, &page)
}

#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other(LOGIN_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{
        location, post_form, session_cookie, test_session_middleware,
    };
    use crate::test_support::{SEED_PASSWORD, SeededCampus};
    use actix_web::{App, test};
    use rstest::rstest;

    #[actix_web::test]
    async fn index_redirects_anonymous_users_to_login() {
        let campus = SeededCampus::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(campus.http_state()))
                .wrap(test_session_middleware())
                .configure(configure),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), LOGIN_PATH);
    }

    #[actix_web::test]
    async fn login_then_index_reaches_dashboard() {
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
            post_form(
                "/login",
                &[("login", "ivanova"), ("password", SEED_PASSWORD)],
            )
            .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), DASHBOARD_PATH);
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(location(&res), DASHBOARD_PATH);
    }

    #[rstest]
    #[case("ivanova", "wrong", StatusCode::UNAUTHORIZED, "invalid login or password")]
    #[case("nobody", SEED_PASSWORD, StatusCode::UNAUTHORIZED, "invalid login or password")]
    #[case("  ", SEED_PASSWORD, StatusCode::BAD_REQUEST, "login must not be empty")]
    #[case("ivanova", "", StatusCode::BAD_REQUEST, "password must not be empty")]
    #[actix_web::test]
    async fn failed_login_rerenders_form(
        #[case] submitted_login: &str,
        #[case] password: &str,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
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
            post_form("/login", &[("login", submitted_login), ("password", password)]).to_request(),
        )
        .await;
        assert_eq!(res.status(), status);
        let html = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8");
        assert!(html.contains(message), "missing {message:?} in page");
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
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
            post_form("/login", &[("login", "petrov"), ("password", SEED_PASSWORD)])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(location(&res), LOGIN_PATH);
        let cleared = session_cookie(&res);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/dashboard").cookie(cleared).to_request(),
        )
        .await;
        assert_eq!(location(&res), LOGIN_PATH);
    }

    #[actix_web::test]
    async fn session_of_deleted_user_is_purged() {
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
            post_form("/login", &[("login", "petrov"), ("password", SEED_PASSWORD)])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&res);
        campus.store.delete_user(campus.teacher);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/dashboard").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), LOGIN_PATH);
    }
}
