use axum::extract::{Path, State};
use axum::Json;
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use farmstead_auth_types::identity::Identity;
use farmstead_domain::user::Role;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::handlers::{IdPath, MessageResponse};
use crate::state::AppState;
use crate::usecase::user::{DeleteUserUseCase, GetUserUseCase, ListUsersUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "farmstead_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /api/me ──────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── GET /api/users ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users: Vec<UserResponse> = usecase
        .execute(identity.user_id)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(UserListResponse {
        total: users.len(),
        users,
    }))
}

// ── DELETE /api/users/{id} ───────────────────────────────────────────────────

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Path(target), _): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(identity.user_id, target).await?;
    Ok(Json(MessageResponse {
        msg: "user deleted".to_owned(),
    }))
}
