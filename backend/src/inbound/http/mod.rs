//! HTTP inbound adapter serving the server-rendered pages.
//!
//! Every POST answers with a `303 See Other` (post/redirect/get) except form
//! re-renders on validation failures.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod health;
pub mod login;
pub mod manage_students_courses;
pub mod pages;
pub mod register;
pub mod session;
pub mod session_config;
pub mod state;
pub mod student_courses;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const DASHBOARD_PATH: &str = "/dashboard";
pub(crate) const DIRECTOR_DASHBOARD_PATH: &str = "/director_dashboard";
pub(crate) const STUDENT_COURSES_PATH: &str = "/student_courses";
pub(crate) const MANAGE_STUDENTS_COURSES_PATH: &str = "/manage_students_courses";

/// Register every page route plus the 404 fallback.
///
/// Handlers expect `web::Data<HttpState>` and a session middleware on the
/// enclosing app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login::index)
        .service(login::login_page)
        .service(login::login)
        .service(login::logout)
        .service(register::register_page)
        .service(register::register)
        .service(dashboard::dashboard)
        .service(dashboard::director_dashboard)
        .service(dashboard::enrollment_settings)
        .service(student_courses::choose_courses)
        .service(student_courses::submit_choices)
        .service(student_courses::cancel_enrollment)
        .service(manage_students_courses::manage_page)
        .service(manage_students_courses::apply_assignment)
        .default_service(web::to(error::not_found));
}
