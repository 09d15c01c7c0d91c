//! End-to-end scenarios over the full page router with in-memory ports.
//!
//! A freshly registered student picks electives, direction staff adjust the
//! assignment and close enrollment, and the student can no longer cancel.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use rstest::{fixture, rstest};

use electives::Trace;
use electives::domain::TRACE_ID_HEADER;
use electives::inbound::http::configure;
use electives::inbound::http::test_utils::{location, post_form, test_session_middleware};
use electives::test_support::{SEED_PASSWORD, SeededCampus};

#[fixture]
fn campus() -> SeededCampus {
    SeededCampus::new()
}

async fn init_app(
    campus: &SeededCampus,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(campus.http_state()))
            .wrap(test_session_middleware())
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Cookie jar holding the single session cookie.
#[derive(Default)]
struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    fn attach(&self, request: TestRequest) -> Request {
        match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()).to_request(),
            None => request.to_request(),
        }
    }

    fn remember<B>(&mut self, response: &ServiceResponse<B>) {
        if let Some(cookie) = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            self.cookie = Some(cookie.into_owned());
        }
    }

    async fn send<S>(&mut self, app: &S, request: TestRequest) -> ServiceResponse<BoxBody>
    where
        S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    {
        let response = test::call_service(app, self.attach(request)).await;
        self.remember(&response);
        response
    }

    async fn page<S>(&mut self, app: &S, uri: &str) -> (StatusCode, String)
    where
        S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    {
        let response = self.send(app, TestRequest::get().uri(uri)).await;
        let status = response.status();
        let body = test::read_body(response).await;
        (status, String::from_utf8(body.to_vec()).expect("utf8 page"))
    }

    async fn sign_in<S>(&mut self, app: &S, login: &str, password: &str)
    where
        S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    {
        let response = self
            .send(
                app,
                post_form("/login", &[("login", login), ("password", password)]),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
    }
}

#[rstest]
#[actix_web::test]
async fn registered_student_chooses_and_staff_adjusts(campus: SeededCampus) {
    let app = init_app(&campus).await;
    let direction = campus.direction_2023.to_string();

    let mut student = Browser::default();
    let response = student
        .send(
            &app,
            post_form(
                "/register",
                &[
                    ("fio", "Smirnov Oleg"),
                    ("login", "smirnov"),
                    ("password", "hunter2"),
                    ("roles", "Студент"),
                    ("direction", direction.as_str()),
                    ("group_number", "2431"),
                    ("admission_year", "2024"),
                ],
            ),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let (_, login_page) = student.page(&app, "/login").await;
    assert!(login_page.contains("registration complete"));

    let account = campus.store.user_by_login("smirnov").expect("registered");
    assert_eq!(account.direction_id(), Some(campus.direction_2024));

    student.sign_in(&app, "smirnov", "hunter2").await;
    let (status, choices) = student.page(&app, "/student_courses").await;
    assert_eq!(status, StatusCode::OK);
    assert!(choices.contains("Machine learning"));
    assert!(!choices.contains("Legacy systems"));

    let [ml, db, compilers] = [campus.courses[0], campus.courses[1], campus.courses[2]];
    let (ml_id, compilers_id) = (ml.to_string(), compilers.to_string());
    let response = student
        .send(
            &app,
            post_form(
                "/student_courses",
                &[("pair_0", ml_id.as_str()), ("pair_1", compilers_id.as_str())],
            ),
        )
        .await;
    assert_eq!(location(&response), "/student_courses");
    assert_eq!(campus.store.enrollments_of(account.id()), vec![ml, compilers]);

    let mut staff = Browser::default();
    staff.sign_in(&app, "sidorova", SEED_PASSWORD).await;
    let (status, overview) = staff.page(&app, "/manage_students_courses").await;
    assert_eq!(status, StatusCode::OK);
    assert!(overview.contains("<td>Smirnov Oleg</td><td>Machine learning</td>"));

    let student_id = account.id().to_string();
    let (ml_id, db_id) = (ml.to_string(), db.to_string());
    for (course, action) in [(ml_id.as_str(), "remove"), (db_id.as_str(), "assign")] {
        let response = staff
            .send(
                &app,
                post_form(
                    "/manage_students_courses",
                    &[
                        ("student", student_id.as_str()),
                        ("course", course),
                        ("action", action),
                    ],
                ),
            )
            .await;
        assert_eq!(location(&response), "/manage_students_courses");
    }
    assert_eq!(campus.store.enrollments_of(account.id()), vec![db, compilers]);

    let response = staff
        .send(&app, post_form("/enrollment_settings", &[]))
        .await;
    assert_eq!(location(&response), "/director_dashboard");
    let (_, dashboard) = staff.page(&app, "/director_dashboard").await;
    assert!(dashboard.contains("enrollment is now closed"));

    let response = student
        .send(&app, TestRequest::post().uri("/cancel_enrollment"))
        .await;
    assert_eq!(location(&response), "/student_courses");
    assert_eq!(campus.store.enrollments_of(account.id()).len(), 2);
    let (_, choices) = student.page(&app, "/student_courses").await;
    assert!(choices.contains("enrollment is closed"));
}

#[rstest]
#[case("/student_courses")]
#[case("/director_dashboard")]
#[case("/manage_students_courses")]
#[actix_web::test]
async fn pages_redirect_anonymous_visitors_to_login(campus: SeededCampus, #[case] uri: &str) {
    let app = init_app(&campus).await;
    let response = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[rstest]
#[actix_web::test]
async fn teacher_is_refused_staff_pages_with_trace_id(campus: SeededCampus) {
    let app = init_app(&campus).await;
    let mut teacher = Browser::default();
    teacher.sign_in(&app, "petrov", SEED_PASSWORD).await;

    let response = teacher
        .send(&app, TestRequest::get().uri("/manage_students_courses"))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body = test::read_body(response).await;
    let html = String::from_utf8(body.to_vec()).expect("utf8 page");
    assert!(html.contains(&trace_id));
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session(campus: SeededCampus) {
    let app = init_app(&campus).await;
    let mut student = Browser::default();
    student.sign_in(&app, "ivanova", SEED_PASSWORD).await;

    let response = student.send(&app, TestRequest::get().uri("/logout")).await;
    assert_eq!(location(&response), "/login");
    let response = student.send(&app, TestRequest::get().uri("/dashboard")).await;
    assert_eq!(location(&response), "/login");
}
