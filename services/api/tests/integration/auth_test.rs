use axum::http::StatusCode;
use serde_json::{Value, json};

use farmstead_auth_types::token::now_secs;
use farmstead_testing::fixture::{login_body, register_body};

use crate::helpers::{TEST_SECRET, register, sign_up, test_server};

// ── POST /api/register ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_account_with_user_role() {
    let server = test_server().await;

    let body = register(&server, "grower@farm.test").await;

    assert_eq!(body["email"], "grower@farm.test");
    assert_eq!(body["name"], "Test User");
    assert_eq!(body["role"], "user");
    assert!(body["id"].is_string());
    assert!(body.get("secret").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let server = test_server().await;
    register(&server, "dup@farm.test").await;

    let response = server
        .post("/api/register")
        .json(&register_body("Other", "dup@farm.test", "another secret"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_registration_without_secret() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .json(&json!({ "name": "No Secret", "email": "ns@farm.test" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_FIELD");
}

#[tokio::test]
async fn should_reject_malformed_body() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .text("{ not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_BODY");
}

#[tokio::test]
async fn should_accept_password_alias_for_secret() {
    let server = test_server().await;
    let creds = json!({ "name": "Alias", "email": "alias@farm.test", "password": "pw-alias-1" });

    server
        .post("/api/register")
        .json(&creds)
        .await
        .assert_status(StatusCode::CREATED);
    let response = server
        .post("/api/login")
        .json(&json!({ "email": "alias@farm.test", "password": "pw-alias-1" }))
        .await;

    response.assert_status_ok();
}

// ── POST /api/login ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_bearer_token_on_login() {
    let server = test_server().await;
    register(&server, "login@farm.test").await;

    let response = server
        .post("/api/login")
        .json(&login_body("login@farm.test", TEST_SECRET))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["token_type"], "Bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "login@farm.test");

    let expires_at = body["expires_at"].as_u64().unwrap();
    let day = 24 * 60 * 60;
    assert!(expires_at > now_secs() + day - 60);
    assert!(expires_at <= now_secs() + day);
}

#[tokio::test]
async fn should_answer_unknown_email_and_wrong_secret_identically() {
    let server = test_server().await;
    register(&server, "known@farm.test").await;

    let wrong_secret = server
        .post("/api/login")
        .json(&login_body("known@farm.test", "not the secret"))
        .await;
    let unknown_email = server
        .post("/api/login")
        .json(&login_body("nobody@farm.test", TEST_SECRET))
        .await;

    wrong_secret.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    let wrong_secret = wrong_secret.json::<Value>();
    assert_eq!(wrong_secret["kind"], "INVALID_CREDENTIALS");
    assert_eq!(wrong_secret, unknown_email.json::<Value>());
}

#[tokio::test]
async fn should_reject_login_without_email() {
    let server = test_server().await;

    let response = server
        .post("/api/login")
        .json(&json!({ "secret": TEST_SECRET }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_FIELD");
}

// ── End to end ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reach_protected_routes_with_login_token() {
    let server = test_server().await;
    let account = sign_up(&server, "e2e@farm.test").await;
    let (name, value) = account.auth();

    let fields = server.get("/api/fields").add_header(name.clone(), value.clone()).await;
    fields.assert_status_ok();
    fields.assert_json(&json!({ "fields": [], "total": 0 }));

    let me = server.get("/api/me").add_header(name, value).await;
    me.assert_status_ok();
    let me = me.json::<Value>();
    assert_eq!(me["id"], account.id.to_string());
    assert_eq!(me["email"], account.email);
    assert_eq!(me["is_active"], true);
}
