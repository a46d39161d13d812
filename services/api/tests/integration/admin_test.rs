use axum::http::StatusCode;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::Value;
use uuid::Uuid;

use farmstead_api::domain::repository::UserRepository;
use farmstead_api::infra::db::DbUserRepository;
use farmstead_api_schema::{equipment, fields, inventory, staff};
use farmstead_domain::user::Role;
use farmstead_testing::auth::MockAuth;
use farmstead_testing::fixture::{equipment_body, field_body, inventory_body, staff_body};

use crate::helpers::{Account, create, sign_up, test_app};

async fn promote(db: &DatabaseConnection, account: &Account) {
    let repo = DbUserRepository { db: db.clone() };
    assert!(repo.set_role(account.id, Role::Admin).await.unwrap());
}

async fn owned_rows(db: &DatabaseConnection, owner: Uuid) -> u64 {
    fields::Entity::find()
        .filter(fields::Column::UserId.eq(owner))
        .count(db)
        .await
        .unwrap()
        + equipment::Entity::find()
            .filter(equipment::Column::UserId.eq(owner))
            .count(db)
            .await
            .unwrap()
        + inventory::Entity::find()
            .filter(inventory::Column::UserId.eq(owner))
            .count(db)
            .await
            .unwrap()
        + staff::Entity::find()
            .filter(staff::Column::UserId.eq(owner))
            .count(db)
            .await
            .unwrap()
}

// ── GET /api/users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_user_listing_for_regular_user() {
    let (server, _db) = test_app().await;
    let user = sign_up(&server, "plain@farm.test").await;
    let (name, value) = user.auth();

    let response = server.get("/api/users").add_header(name, value).await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_ignore_admin_role_claimed_only_by_token() {
    let (server, _db) = test_app().await;
    let user = sign_up(&server, "claims@farm.test").await;
    let forged_role = MockAuth::new(user.id, Role::Admin);

    let response = server
        .get("/api/users")
        .add_header(axum::http::header::AUTHORIZATION, forged_role.bearer())
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_list_all_users_for_admin() {
    let (server, db) = test_app().await;
    let admin = sign_up(&server, "admin@farm.test").await;
    sign_up(&server, "one@farm.test").await;
    sign_up(&server, "two@farm.test").await;
    promote(&db, &admin).await;
    let (name, value) = admin.auth();

    let response = server.get("/api/users").add_header(name, value).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 3);
    let users = body["users"].as_array().unwrap();
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    assert!(
        users
            .iter()
            .any(|u| u["email"] == "admin@farm.test" && u["role"] == "admin")
    );
}

#[tokio::test]
async fn should_report_vanished_caller_as_user_not_found() {
    let (server, _db) = test_app().await;
    let ghost = MockAuth::new(Uuid::now_v7(), Role::Admin);

    let response = server
        .get("/api/users")
        .add_header(axum::http::header::AUTHORIZATION, ghost.bearer())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "USER_NOT_FOUND");
}

// ── DELETE /api/users/{id} ───────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_user_and_everything_they_own() {
    let (server, db) = test_app().await;
    let admin = sign_up(&server, "root@farm.test").await;
    let doomed = sign_up(&server, "doomed@farm.test").await;
    let bystander = sign_up(&server, "bystander@farm.test").await;
    promote(&db, &admin).await;

    let field = create(&server, &doomed, "/api/fields", &field_body("South")).await;
    let mut tractor = equipment_body("Tractor");
    tractor["field_id"] = field["id"].clone();
    create(&server, &doomed, "/api/equipment", &tractor).await;
    create(&server, &doomed, "/api/inventory", &inventory_body("Seed")).await;
    create(&server, &doomed, "/api/staff", &staff_body("Ann", "ann@farm.test")).await;
    create(&server, &bystander, "/api/fields", &field_body("Kept")).await;
    assert_eq!(owned_rows(&db, doomed.id).await, 4);

    let (name, value) = admin.auth();
    let response = server
        .delete(&format!("/api/users/{}", doomed.id))
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["msg"], "user deleted");
    assert_eq!(owned_rows(&db, doomed.id).await, 0);
    assert_eq!(owned_rows(&db, bystander.id).await, 1);

    let (name, value) = doomed.auth();
    server
        .get("/api/me")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_refuse_writes_from_token_of_deleted_account() {
    let (server, db) = test_app().await;
    let gone = sign_up(&server, "gone@farm.test").await;
    let repo = DbUserRepository { db: db.clone() };
    assert!(repo.delete(gone.id).await.unwrap());
    let (name, value) = gone.auth();

    let response = server
        .post("/api/fields")
        .add_header(name, value)
        .json(&field_body("Orphan"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "USER_NOT_FOUND");
    assert_eq!(owned_rows(&db, gone.id).await, 0);
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_target() {
    let (server, db) = test_app().await;
    let admin = sign_up(&server, "root2@farm.test").await;
    promote(&db, &admin).await;
    let (name, value) = admin.auth();

    let response = server
        .delete(&format!("/api/users/{}", Uuid::now_v7()))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_forbid_delete_for_regular_user() {
    let (server, _db) = test_app().await;
    let user = sign_up(&server, "u1@farm.test").await;
    let other = sign_up(&server, "u2@farm.test").await;
    let (name, value) = user.auth();

    server
        .delete(&format!("/api/users/{}", other.id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
