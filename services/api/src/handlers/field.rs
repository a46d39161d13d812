use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use farmstead_auth_types::identity::Identity;
use farmstead_domain::resource::ResourceKind;

use crate::domain::types::Field;
use crate::error::ApiError;
use crate::handlers::{IdPath, JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::field::FieldInput;
use crate::usecase::resource::{
    CreateRecordUseCase, DeleteRecordUseCase, GetRecordUseCase, ListRecordsUseCase,
    UpdateRecordUseCase,
};

#[derive(Serialize)]
pub struct FieldResponse {
    pub id: Uuid,
    pub name: String,
    pub crop: String,
    pub area: f64,
    pub location: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub size: Option<f64>,
    pub status: String,
    pub next_action: Option<String>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Field> for FieldResponse {
    fn from(field: Field) -> Self {
        Self {
            id: field.id,
            name: field.name,
            crop: field.crop,
            area: field.area,
            location: field.location,
            city: field.city,
            latitude: field.latitude,
            longitude: field.longitude,
            size: field.size,
            status: field.status,
            next_action: field.next_action,
            created_at: field.created_at,
            updated_at: field.updated_at,
        }
    }
}

// ── GET /api/fields ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct FieldListResponse {
    pub fields: Vec<FieldResponse>,
    pub total: usize,
}

pub async fn list_fields(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<FieldListResponse>, ApiError> {
    let usecase = ListRecordsUseCase {
        repo: state.field_repo(),
    };
    let fields: Vec<FieldResponse> = usecase
        .execute(identity.user_id)
        .await?
        .into_iter()
        .map(FieldResponse::from)
        .collect();
    Ok(Json(FieldListResponse {
        total: fields.len(),
        fields,
    }))
}

// ── POST /api/fields ─────────────────────────────────────────────────────────

pub async fn create_field(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Json(body), _): JsonBody<FieldInput>,
) -> Result<(StatusCode, Json<FieldResponse>), ApiError> {
    let usecase = CreateRecordUseCase {
        repo: state.field_repo(),
    };
    let field = usecase.execute(identity.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(field.into())))
}

// ── GET /api/fields/{id} ─────────────────────────────────────────────────────

pub async fn get_field(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<FieldResponse>, ApiError> {
    let usecase = GetRecordUseCase {
        repo: state.field_repo(),
    };
    let field = usecase.execute(identity.user_id, id).await?;
    Ok(Json(field.into()))
}

// ── PUT /api/fields/{id} ─────────────────────────────────────────────────────

pub async fn update_field(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(body), _): JsonBody<FieldInput>,
) -> Result<Json<FieldResponse>, ApiError> {
    let usecase = UpdateRecordUseCase {
        repo: state.field_repo(),
    };
    let field = usecase.execute(identity.user_id, id, body).await?;
    Ok(Json(field.into()))
}

// ── DELETE /api/fields/{id} ──────────────────────────────────────────────────

/// Equipment, inventory and staff that pointed at the field are kept and detached.
pub async fn delete_field(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteRecordUseCase {
        repo: state.field_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(MessageResponse::deleted(ResourceKind::Field))
}
