//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test::{self}, web};
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_text(response: HttpResponse) -> String {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::SEE_OTHER)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[actix_web::test]
async fn unauthorized_redirects_to_login() {
    let response = ResponseError::error_response(&Error::unauthorized("login required"));
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(LOGIN_PATH)
    );
}

#[actix_web::test]
async fn forbidden_renders_error_page_with_trace_id() {
    let error = Error::forbidden("staff only").with_trace_id(TRACE_ID);
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some(TRACE_ID)
    );
    let html = body_text(response).await;
    assert!(html.contains("staff only"));
    assert!(html.contains(TRACE_ID));
}

#[actix_web::test]
async fn internal_messages_are_redacted() {
    let error = Error::internal("connection string postgres://secret").with_trace_id(TRACE_ID);
    let html = body_text(ResponseError::error_response(&error)).await;
    assert!(!html.contains("secret"));
    assert!(html.contains("Internal server error"));
    assert!(html.contains(TRACE_ID));
}

#[actix_web::test]
async fn unknown_paths_render_not_found() {
    let app = test::init_service(App::new().default_service(web::to(not_found))).await;
    let res = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let html = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8 body");
    assert!(html.contains("/nowhere"));
}
