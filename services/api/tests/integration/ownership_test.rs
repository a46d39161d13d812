use axum::http::StatusCode;
use serde_json::{Value, json};

use farmstead_testing::fixture::{equipment_body, field_body, inventory_body, staff_body};

use crate::helpers::{create, id_of, sign_up, test_server};

#[tokio::test]
async fn should_scope_lists_to_the_caller() {
    let server = test_server().await;
    let alice = sign_up(&server, "alice@farm.test").await;
    let bob = sign_up(&server, "bob@farm.test").await;
    create(&server, &alice, "/api/fields", &field_body("Alice North")).await;
    create(&server, &alice, "/api/fields", &field_body("Alice South")).await;
    create(&server, &bob, "/api/fields", &field_body("Bob East")).await;

    let (name, value) = bob.auth();
    let response = server.get("/api/fields").add_header(name, value).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["fields"][0]["name"], "Bob East");
}

#[tokio::test]
async fn should_hide_other_users_records_behind_not_found() {
    let server = test_server().await;
    let alice = sign_up(&server, "alice2@farm.test").await;
    let bob = sign_up(&server, "bob2@farm.test").await;

    let cases = [
        ("/api/fields", field_body("Private"), "FIELD_NOT_FOUND"),
        ("/api/equipment", equipment_body("Private"), "EQUIPMENT_NOT_FOUND"),
        ("/api/inventory", inventory_body("Private"), "INVENTORY_ITEM_NOT_FOUND"),
        (
            "/api/staff",
            staff_body("Private", "p@farm.test"),
            "STAFF_NOT_FOUND",
        ),
    ];

    for (collection, body, kind) in cases {
        let record = create(&server, &alice, collection, &body).await;
        let path = format!("{collection}/{}", id_of(&record));
        let (name, value) = bob.auth();

        let get = server.get(&path).add_header(name.clone(), value.clone()).await;
        get.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(get.json::<Value>()["kind"], kind);

        server
            .put(&path)
            .add_header(name.clone(), value.clone())
            .json(&json!({ "name": "Hijacked" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&path)
            .add_header(name, value)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let (name, value) = alice.auth();
        let still_there = server.get(&path).add_header(name, value).await;
        still_there.assert_status_ok();
        assert_eq!(still_there.json::<Value>()["name"], "Private");
    }
}

#[tokio::test]
async fn should_take_owner_from_token_not_body() {
    let server = test_server().await;
    let alice = sign_up(&server, "alice3@farm.test").await;
    let bob = sign_up(&server, "bob3@farm.test").await;

    let mut body = field_body("Planted");
    body["user_id"] = json!(bob.id);
    let field = create(&server, &alice, "/api/fields", &body).await;

    let (name, value) = alice.auth();
    server
        .get(&format!("/api/fields/{}", id_of(&field)))
        .add_header(name, value)
        .await
        .assert_status_ok();
    let (name, value) = bob.auth();
    server
        .get("/api/fields")
        .add_header(name, value)
        .await
        .assert_json(&json!({ "fields": [], "total": 0 }));
}

#[tokio::test]
async fn should_reject_link_to_another_users_field() {
    let server = test_server().await;
    let alice = sign_up(&server, "alice4@farm.test").await;
    let bob = sign_up(&server, "bob4@farm.test").await;
    let bobs_field = create(&server, &bob, "/api/fields", &field_body("Bob's")).await;

    let mut tractor = equipment_body("Tractor");
    tractor["field_id"] = bobs_field["id"].clone();
    let (name, value) = alice.auth();
    let response = server
        .post("/api/equipment")
        .add_header(name, value)
        .json(&tractor)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_FIELD_REFERENCE");
}
