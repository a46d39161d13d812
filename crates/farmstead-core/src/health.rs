use axum::Json;
use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`: readiness check.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /api/ping`: connectivity check used by the web client.
pub async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "msg": "pong", "server": "running" }))
}
