use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use serde_json::Value;
use uuid::Uuid;

use farmstead_domain::user::Role;
use farmstead_testing::auth::MockAuth;

use crate::helpers::{TEST_ORIGIN, sign_up, test_server};

async fn assert_rejected(auth: HeaderValue, kind: &str) {
    let server = test_server().await;

    let response = server
        .get("/api/fields")
        .add_header(header::AUTHORIZATION, auth)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], kind);
}

#[tokio::test]
async fn should_reject_protected_route_without_authorization() {
    let server = test_server().await;

    let response = server.get("/api/fields").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn should_reject_expired_token() {
    let expired = MockAuth::new(Uuid::now_v7(), Role::User).with_ttl(Duration::ZERO);
    assert_rejected(expired.bearer(), "INVALID_TOKEN").await;
}

#[tokio::test]
async fn should_reject_token_signed_with_foreign_secret() {
    let forged = MockAuth::new(Uuid::now_v7(), Role::Admin).with_secret("someone-else");
    assert_rejected(forged.bearer(), "INVALID_TOKEN").await;
}

#[tokio::test]
async fn should_reject_tampered_token() {
    let token = MockAuth::new(Uuid::now_v7(), Role::User).token();
    // Flip one signature character away from the trailing padding bits.
    let at = token.rfind('.').unwrap() + 5;
    let mut tampered = token.into_bytes();
    tampered[at] = if tampered[at] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    assert_rejected(
        farmstead_testing::auth::bearer(&tampered),
        "INVALID_TOKEN",
    )
    .await;
}

#[tokio::test]
async fn should_reject_non_bearer_scheme() {
    assert_rejected(HeaderValue::from_static("Basic dXNlcjpzZWNyZXQ="), "INVALID_TOKEN").await;
}

#[tokio::test]
async fn should_serve_public_paths_without_token() {
    let server = test_server().await;

    let ping = server.get("/api/ping").await;
    ping.assert_status_ok();
    assert_eq!(ping.json::<Value>()["msg"], "pong");

    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_answer_unknown_route_with_401_before_404() {
    let server = test_server().await;

    server
        .get("/api/nothing-here")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_attach_request_id_to_responses() {
    let server = test_server().await;
    let request_id = HeaderName::from_static("x-request-id");

    let generated = server.get("/api/ping").await;
    assert!(generated.maybe_header(request_id.clone()).is_some());

    let echoed = server
        .get("/api/ping")
        .add_header(request_id.clone(), HeaderValue::from_static("req-42"))
        .await;
    assert_eq!(echoed.header(request_id), "req-42");
}

#[tokio::test]
async fn should_answer_cors_preflight_without_token() {
    let server = test_server().await;

    let response = server
        .method(axum::http::Method::OPTIONS, "/api/fields")
        .add_header(header::ORIGIN, HeaderValue::from_static(TEST_ORIGIN))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("authorization,content-type"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        TEST_ORIGIN
    );
}

#[tokio::test]
async fn should_not_allow_foreign_origin() {
    let server = test_server().await;
    let account = sign_up(&server, "cors@farm.test").await;
    let (name, value) = account.auth();

    let response = server
        .get("/api/fields")
        .add_header(name, value)
        .add_header(header::ORIGIN, HeaderValue::from_static("http://evil.test"))
        .await;

    response.assert_status_ok();
    assert!(
        response
            .maybe_header(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
