use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use farmstead_auth_types::identity::Identity;
use farmstead_domain::resource::ResourceKind;

use crate::domain::types::StaffMember;
use crate::error::ApiError;
use crate::handlers::{IdPath, JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::resource::{
    CreateRecordUseCase, DeleteRecordUseCase, GetRecordUseCase, ListRecordsUseCase,
    UpdateRecordUseCase,
};
use crate::usecase::staff::StaffInput;

#[derive(Serialize)]
pub struct StaffResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
    pub field_id: Option<Uuid>,
    pub field_name: Option<String>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<StaffMember> for StaffResponse {
    fn from(member: StaffMember) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
            phone: member.phone,
            position: member.position,
            hire_date: member.hire_date,
            salary: member.salary,
            status: member.status,
            notes: member.notes,
            field_id: member.field_id,
            field_name: member.field_name,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

// ── GET /api/staff ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StaffListResponse {
    pub staff: Vec<StaffResponse>,
    pub total: usize,
}

pub async fn list_staff(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<StaffListResponse>, ApiError> {
    let usecase = ListRecordsUseCase {
        repo: state.staff_repo(),
    };
    let staff: Vec<StaffResponse> = usecase
        .execute(identity.user_id)
        .await?
        .into_iter()
        .map(StaffResponse::from)
        .collect();
    Ok(Json(StaffListResponse {
        total: staff.len(),
        staff,
    }))
}

// ── POST /api/staff ──────────────────────────────────────────────────────────

pub async fn create_staff_member(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Json(body), _): JsonBody<StaffInput>,
) -> Result<(StatusCode, Json<StaffResponse>), ApiError> {
    let usecase = CreateRecordUseCase {
        repo: state.staff_repo(),
    };
    let member = usecase.execute(identity.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

// ── GET /api/staff/{id} ──────────────────────────────────────────────────────

pub async fn get_staff_member(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<StaffResponse>, ApiError> {
    let usecase = GetRecordUseCase {
        repo: state.staff_repo(),
    };
    let member = usecase.execute(identity.user_id, id).await?;
    Ok(Json(member.into()))
}

// ── PUT /api/staff/{id} ──────────────────────────────────────────────────────

pub async fn update_staff_member(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(body), _): JsonBody<StaffInput>,
) -> Result<Json<StaffResponse>, ApiError> {
    let usecase = UpdateRecordUseCase {
        repo: state.staff_repo(),
    };
    let member = usecase.execute(identity.user_id, id, body).await?;
    Ok(Json(member.into()))
}

// ── DELETE /api/staff/{id} ───────────────────────────────────────────────────

pub async fn delete_staff_member(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteRecordUseCase {
        repo: state.staff_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(MessageResponse::deleted(ResourceKind::Staff))
}
