use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use farmstead_auth_types::identity::Identity;
use farmstead_domain::resource::ResourceKind;

use crate::domain::types::Equipment;
use crate::error::ApiError;
use crate::handlers::{IdPath, JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::equipment::EquipmentInput;
use crate::usecase::resource::{
    CreateRecordUseCase, DeleteRecordUseCase, GetRecordUseCase, ListRecordsUseCase,
    UpdateRecordUseCase,
};

#[derive(Serialize)]
pub struct EquipmentResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub status: String,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub notes: Option<String>,
    pub field_id: Option<Uuid>,
    pub field_name: Option<String>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Equipment> for EquipmentResponse {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id,
            name: equipment.name,
            kind: equipment.kind,
            brand: equipment.brand,
            model: equipment.model,
            year: equipment.year,
            serial_number: equipment.serial_number,
            purchase_date: equipment.purchase_date,
            status: equipment.status,
            last_maintenance: equipment.last_maintenance,
            next_maintenance: equipment.next_maintenance,
            notes: equipment.notes,
            field_id: equipment.field_id,
            field_name: equipment.field_name,
            created_at: equipment.created_at,
            updated_at: equipment.updated_at,
        }
    }
}

// ── GET /api/equipment ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EquipmentListResponse {
    pub equipment: Vec<EquipmentResponse>,
    pub total: usize,
}

pub async fn list_equipment(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<EquipmentListResponse>, ApiError> {
    let usecase = ListRecordsUseCase {
        repo: state.equipment_repo(),
    };
    let equipment: Vec<EquipmentResponse> = usecase
        .execute(identity.user_id)
        .await?
        .into_iter()
        .map(EquipmentResponse::from)
        .collect();
    Ok(Json(EquipmentListResponse {
        total: equipment.len(),
        equipment,
    }))
}

// ── POST /api/equipment ──────────────────────────────────────────────────────

pub async fn create_equipment(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Json(body), _): JsonBody<EquipmentInput>,
) -> Result<(StatusCode, Json<EquipmentResponse>), ApiError> {
    let usecase = CreateRecordUseCase {
        repo: state.equipment_repo(),
    };
    let equipment = usecase.execute(identity.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(equipment.into())))
}

// ── GET /api/equipment/{id} ──────────────────────────────────────────────────

pub async fn get_equipment(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<EquipmentResponse>, ApiError> {
    let usecase = GetRecordUseCase {
        repo: state.equipment_repo(),
    };
    let equipment = usecase.execute(identity.user_id, id).await?;
    Ok(Json(equipment.into()))
}

// ── PUT /api/equipment/{id} ──────────────────────────────────────────────────

pub async fn update_equipment(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(body), _): JsonBody<EquipmentInput>,
) -> Result<Json<EquipmentResponse>, ApiError> {
    let usecase = UpdateRecordUseCase {
        repo: state.equipment_repo(),
    };
    let equipment = usecase.execute(identity.user_id, id, body).await?;
    Ok(Json(equipment.into()))
}

// ── DELETE /api/equipment/{id} ───────────────────────────────────────────────

pub async fn delete_equipment(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteRecordUseCase {
        repo: state.equipment_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(MessageResponse::deleted(ResourceKind::Equipment))
}
