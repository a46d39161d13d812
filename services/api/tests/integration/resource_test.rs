use axum::http::StatusCode;
use serde_json::{Value, json};

use farmstead_testing::fixture::{equipment_body, field_body, inventory_body, staff_body};

use crate::helpers::{create, id_of, sign_up, test_server};

// ── Fields ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_run_full_field_lifecycle() {
    let server = test_server().await;
    let grower = sign_up(&server, "fields@farm.test").await;
    let (name, value) = grower.auth();

    let field = create(&server, &grower, "/api/fields", &field_body("North")).await;
    assert_eq!(field["crop"], "wheat");
    assert_eq!(field["area"], 12.5);
    assert_eq!(field["status"], "active");
    let path = format!("/api/fields/{}", id_of(&field));

    let updated = server
        .put(&path)
        .add_header(name.clone(), value.clone())
        .json(&json!({ "crop": "barley", "next_action": "harvest" }))
        .await;
    updated.assert_status_ok();
    let updated = updated.json::<Value>();
    assert_eq!(updated["crop"], "barley");
    assert_eq!(updated["next_action"], "harvest");
    assert_eq!(updated["name"], "North");
    assert_eq!(updated["city"], "Ames");
    assert_eq!(updated["created_at"], field["created_at"]);

    let deleted = server
        .delete(&path)
        .add_header(name.clone(), value.clone())
        .await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>()["msg"], "field deleted");

    let gone = server.get(&path).add_header(name, value).await;
    gone.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(gone.json::<Value>()["kind"], "FIELD_NOT_FOUND");
}

#[tokio::test]
async fn should_require_mandatory_fields_on_create() {
    let server = test_server().await;
    let grower = sign_up(&server, "required@farm.test").await;

    let cases = [
        ("/api/fields", json!({ "name": "No crop", "area": 3.0 })),
        ("/api/equipment", json!({ "type": "plow" })),
        ("/api/inventory", json!({ "name": "Urea", "category": "fertilizer", "unit": "kg" })),
        ("/api/staff", json!({ "name": "Sam", "email": "sam@farm.test" })),
        ("/api/fields", json!({ "name": "   ", "crop": "corn", "area": 3.0 })),
    ];

    for (collection, body) in cases {
        let (name, value) = grower.auth();
        let response = server
            .post(collection)
            .add_header(name, value)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["kind"], "MISSING_FIELD");
    }
}

#[tokio::test]
async fn should_reject_text_wider_than_its_column() {
    let server = test_server().await;
    let grower = sign_up(&server, "wide@farm.test").await;
    let mut hand = staff_body("Lee", "lee@farm.test");
    hand["phone"] = json!("5".repeat(21));
    let (name, value) = grower.auth();

    let response = server
        .post("/api/staff")
        .add_header(name.clone(), value.clone())
        .json(&hand)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "FIELD_TOO_LONG");
    assert_eq!(body["message"], "phone must be at most 20 characters");
    server
        .get("/api/staff")
        .add_header(name, value)
        .await
        .assert_json(&json!({ "staff": [], "total": 0 }));
}

#[tokio::test]
async fn should_reject_malformed_record_id() {
    let server = test_server().await;
    let grower = sign_up(&server, "badid@farm.test").await;
    let (name, value) = grower.auth();

    let response = server
        .get("/api/fields/not-a-uuid")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_PATH");
}

// ── Field links ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_field_name_on_linked_records() {
    let server = test_server().await;
    let grower = sign_up(&server, "links@farm.test").await;
    let field = create(&server, &grower, "/api/fields", &field_body("Orchard")).await;

    let mut tractor = equipment_body("Tractor");
    tractor["field_id"] = field["id"].clone();
    tractor["purchase_date"] = json!("2021-04-01");
    let equipment = create(&server, &grower, "/api/equipment", &tractor).await;

    assert_eq!(equipment["type"], "tractor");
    assert_eq!(equipment["status"], "available");
    assert_eq!(equipment["purchase_date"], "2021-04-01");
    assert_eq!(equipment["field_id"], field["id"]);
    assert_eq!(equipment["field_name"], "Orchard");

    let (name, value) = grower.auth();
    let listed = server.get("/api/equipment").add_header(name, value).await;
    listed.assert_status_ok();
    let listed = listed.json::<Value>();
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["equipment"][0]["field_name"], "Orchard");
}

#[tokio::test]
async fn should_reject_unknown_field_reference() {
    let server = test_server().await;
    let grower = sign_up(&server, "dangling@farm.test").await;

    let mut seed = inventory_body("Seed");
    seed["field_id"] = json!(uuid::Uuid::now_v7());
    let (name, value) = grower.auth();
    let response = server
        .post("/api/inventory")
        .add_header(name, value)
        .json(&seed)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_FIELD_REFERENCE");
}

#[tokio::test]
async fn should_delete_linked_records_with_their_field() {
    let server = test_server().await;
    let grower = sign_up(&server, "cascade@farm.test").await;
    let field = create(&server, &grower, "/api/fields", &field_body("Flooded")).await;

    let mut tractor = equipment_body("Tractor");
    tractor["field_id"] = field["id"].clone();
    let mut seed = inventory_body("Seed");
    seed["field_id"] = field["id"].clone();
    let mut hand = staff_body("Lee", "lee@farm.test");
    hand["field_id"] = field["id"].clone();
    let linked = [
        (
            "/api/equipment",
            create(&server, &grower, "/api/equipment", &tractor).await,
            "EQUIPMENT_NOT_FOUND",
        ),
        (
            "/api/inventory",
            create(&server, &grower, "/api/inventory", &seed).await,
            "INVENTORY_ITEM_NOT_FOUND",
        ),
        (
            "/api/staff",
            create(&server, &grower, "/api/staff", &hand).await,
            "STAFF_NOT_FOUND",
        ),
    ];
    let unlinked = create(&server, &grower, "/api/equipment", &equipment_body("Plow")).await;

    let (name, value) = grower.auth();
    server
        .delete(&format!("/api/fields/{}", id_of(&field)))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status_ok();

    for (collection, record, kind) in linked {
        let response = server
            .get(&format!("{collection}/{}", id_of(&record)))
            .add_header(name.clone(), value.clone())
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["kind"], kind);
    }
    server
        .get(&format!("/api/equipment/{}", id_of(&unlinked)))
        .add_header(name, value)
        .await
        .assert_status_ok();
}

// ── Inventory ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_adjust_inventory_quantity() {
    let server = test_server().await;
    let grower = sign_up(&server, "stock@farm.test").await;
    let item = create(&server, &grower, "/api/inventory", &inventory_body("Diesel")).await;
    let (name, value) = grower.auth();

    let response = server
        .put(&format!("/api/inventory/{}", id_of(&item)))
        .add_header(name, value)
        .json(&json!({ "quantity": 7.5 }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["quantity"], 7.5);
    assert_eq!(body["min_quantity"], 10.0);
    assert_eq!(body["unit"], "kg");
}

// ── Staff ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_duplicate_staff_email_for_same_owner() {
    let server = test_server().await;
    let grower = sign_up(&server, "crew@farm.test").await;
    create(&server, &grower, "/api/staff", &staff_body("Kim", "kim@farm.test")).await;
    let (name, value) = grower.auth();

    let response = server
        .post("/api/staff")
        .add_header(name, value)
        .json(&staff_body("Kim Again", "kim@farm.test"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "STAFF_EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_allow_same_staff_email_across_owners() {
    let server = test_server().await;
    let first = sign_up(&server, "first@farm.test").await;
    let second = sign_up(&server, "second@farm.test").await;

    let a = create(&server, &first, "/api/staff", &staff_body("Jo", "jo@farm.test")).await;
    let b = create(&server, &second, "/api/staff", &staff_body("Jo", "jo@farm.test")).await;

    assert_eq!(a["status"], "active");
    assert_ne!(a["id"], b["id"]);
}
