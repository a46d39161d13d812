use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use farmstead_domain::user::Role;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::credential::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

/// Public view of an account returned by register and login.
#[derive(Serialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for AccountSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

// ── POST /api/register ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "password")]
    pub secret: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(body), _): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountSummary>), ApiError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
        hasher: state.hasher.clone(),
    };
    let user = usecase
        .execute(RegisterInput {
            name: body.name,
            last_name: body.last_name,
            email: body.email,
            secret: body.secret,
            role: Role::User,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /api/login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    #[serde(alias = "password")]
    pub secret: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds since the Unix epoch.
    pub expires_at: u64,
    pub user: AccountSummary,
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        hasher: state.hasher.clone(),
        tokens: state.tokens.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            secret: body.secret,
        })
        .await?;
    Ok(Json(LoginResponse {
        access_token: output.token.token,
        token_type: "Bearer",
        expires_at: output.token.expires_at,
        user: output.user.into(),
    }))
}
