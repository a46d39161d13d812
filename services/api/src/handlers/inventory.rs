use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use farmstead_auth_types::identity::Identity;
use farmstead_domain::resource::ResourceKind;

use crate::domain::types::InventoryItem;
use crate::error::ApiError;
use crate::handlers::{IdPath, JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::inventory::InventoryInput;
use crate::usecase::resource::{
    CreateRecordUseCase, DeleteRecordUseCase, GetRecordUseCase, ListRecordsUseCase,
    UpdateRecordUseCase,
};

#[derive(Serialize)]
pub struct InventoryItemResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub min_quantity: f64,
    pub unit: String,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub field_id: Option<Uuid>,
    pub field_name: Option<String>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<InventoryItem> for InventoryItemResponse {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            min_quantity: item.min_quantity,
            unit: item.unit,
            supplier: item.supplier,
            notes: item.notes,
            field_id: item.field_id,
            field_name: item.field_name,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

// ── GET /api/inventory ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InventoryListResponse {
    pub inventory: Vec<InventoryItemResponse>,
    pub total: usize,
}

pub async fn list_inventory(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<InventoryListResponse>, ApiError> {
    let usecase = ListRecordsUseCase {
        repo: state.inventory_repo(),
    };
    let inventory: Vec<InventoryItemResponse> = usecase
        .execute(identity.user_id)
        .await?
        .into_iter()
        .map(InventoryItemResponse::from)
        .collect();
    Ok(Json(InventoryListResponse {
        total: inventory.len(),
        inventory,
    }))
}

// ── POST /api/inventory ──────────────────────────────────────────────────────

pub async fn create_inventory_item(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Json(body), _): JsonBody<InventoryInput>,
) -> Result<(StatusCode, Json<InventoryItemResponse>), ApiError> {
    let usecase = CreateRecordUseCase {
        repo: state.inventory_repo(),
    };
    let item = usecase.execute(identity.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

// ── GET /api/inventory/{id} ──────────────────────────────────────────────────

pub async fn get_inventory_item(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<InventoryItemResponse>, ApiError> {
    let usecase = GetRecordUseCase {
        repo: state.inventory_repo(),
    };
    let item = usecase.execute(identity.user_id, id).await?;
    Ok(Json(item.into()))
}

// ── PUT /api/inventory/{id} ──────────────────────────────────────────────────

pub async fn update_inventory_item(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(body), _): JsonBody<InventoryInput>,
) -> Result<Json<InventoryItemResponse>, ApiError> {
    let usecase = UpdateRecordUseCase {
        repo: state.inventory_repo(),
    };
    let item = usecase.execute(identity.user_id, id, body).await?;
    Ok(Json(item.into()))
}

// ── DELETE /api/inventory/{id} ───────────────────────────────────────────────

pub async fn delete_inventory_item(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteRecordUseCase {
        repo: state.inventory_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(MessageResponse::deleted(ResourceKind::Inventory))
}
