use axum::Json;
use axum::extract::Path;
use axum_extra::extract::WithRejection;
use serde::Serialize;
use uuid::Uuid;

use farmstead_domain::resource::ResourceKind;

use crate::error::ApiError;

pub mod auth;
pub mod equipment;
pub mod field;
pub mod inventory;
pub mod staff;
pub mod user;

/// JSON body whose rejection is reported as an `ApiError`.
pub type JsonBody<T> = WithRejection<Json<T>, ApiError>;

/// `{id}` path segment parsed as a UUID.
pub type IdPath = WithRejection<Path<Uuid>, ApiError>;

#[derive(Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn deleted(kind: ResourceKind) -> Json<Self> {
        Json(Self {
            msg: format!("{kind} deleted"),
        })
    }
}
