use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use farmstead_auth_types::gate::{AccessGate, enforce};
use farmstead_core::health::{healthz, ping, readyz};
use farmstead_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, register},
    equipment::{
        create_equipment, delete_equipment, get_equipment, list_equipment, update_equipment,
    },
    field::{create_field, delete_field, get_field, list_fields, update_field},
    inventory::{
        create_inventory_item, delete_inventory_item, get_inventory_item, list_inventory,
        update_inventory_item,
    },
    staff::{
        create_staff_member, delete_staff_member, get_staff_member, list_staff,
        update_staff_member,
    },
    user::{delete_user, get_me, list_users},
};
use crate::state::AppState;

/// Full HTTP surface. Every route outside the gate's public allow-list requires a bearer token.
///
/// Layer order, outermost first: request id, trace, CORS, gate.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let gate = AccessGate::with_default_paths(state.tokens.clone());

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/ping", get(ping))
        // Credentials
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        // Accounts
        .route("/api/me", get(get_me))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", delete(delete_user))
        // Fields
        .route("/api/fields", get(list_fields).post(create_field))
        .route(
            "/api/fields/{id}",
            get(get_field).put(update_field).delete(delete_field),
        )
        // Equipment
        .route("/api/equipment", get(list_equipment).post(create_equipment))
        .route(
            "/api/equipment/{id}",
            get(get_equipment)
                .put(update_equipment)
                .delete(delete_equipment),
        )
        // Inventory
        .route(
            "/api/inventory",
            get(list_inventory).post(create_inventory_item),
        )
        .route(
            "/api/inventory/{id}",
            get(get_inventory_item)
                .put(update_inventory_item)
                .delete(delete_inventory_item),
        )
        // Staff
        .route("/api/staff", get(list_staff).post(create_staff_member))
        .route(
            "/api/staff/{id}",
            get(get_staff_member)
                .put(update_staff_member)
                .delete(delete_staff_member),
        )
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, enforce))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}
