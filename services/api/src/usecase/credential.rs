use chrono::Utc;
use uuid::Uuid;

use farmstead_auth_types::token::{IssuedToken, TokenService};
use farmstead_domain::user::Role;

use crate::domain::repository::{SecretHasher, UserRepository};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::usecase::resource::{EMAIL_LEN, NAME_LEN, optional_text, required_text};

/// Upper bound on accepted secrets, in characters.
const SECRET_LEN: usize = 1024;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub secret: Option<String>,
    pub role: Role,
}

pub struct RegisterUseCase<R: UserRepository, H: SecretHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: UserRepository, H: SecretHasher> RegisterUseCase<R, H> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        let name = required_text(input.name, "name", NAME_LEN)?;
        let email = required_text(input.email, "email", EMAIL_LEN)?;
        let secret = required_text(input.secret, "secret", SECRET_LEN)?;
        let last_name = optional_text(
            input.last_name.filter(|v| !v.trim().is_empty()),
            "last_name",
            NAME_LEN,
        )?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailAlreadyExists);
        }

        let password_hash = self.hasher.hash(&secret)?;
        drop(secret);

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            password_hash,
            name,
            last_name,
            role: input.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: Option<String>,
    pub secret: Option<String>,
}

pub struct LoginOutput {
    pub token: IssuedToken,
    pub user: User,
}

pub struct LoginUseCase<R: UserRepository, H: SecretHasher> {
    pub repo: R,
    pub hasher: H,
    pub tokens: TokenService,
}

impl<R: UserRepository, H: SecretHasher> LoginUseCase<R, H> {
    /// Unknown email, wrong secret and inactive account are indistinguishable to the caller.
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let email = required_text(input.email, "email", EMAIL_LEN)?;
        let secret = required_text(input.secret, "secret", SECRET_LEN)?;

        let user = self.repo.find_by_email(&email).await?;
        let verified = self
            .hasher
            .verify(&secret, user.as_ref().map(|u| u.password_hash.as_str()));

        let user = match user {
            Some(user) if verified && user.is_active => user,
            _ => return Err(ApiError::InvalidCredentials),
        };

        let token = self.tokens.issue(user.id, user.role, &user.email)?;
        Ok(LoginOutput { token, user })
    }
}

// ── Promote ──────────────────────────────────────────────────────────────────

pub struct PromoteUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> PromoteUseCase<R> {
    /// Grant the admin role to an existing account.
    pub async fn execute(&self, email: &str) -> Result<User, ApiError> {
        let mut user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !self.repo.set_role(user.id, Role::Admin).await? {
            return Err(ApiError::UserNotFound);
        }
        user.role = Role::Admin;
        Ok(user)
    }
}
