use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;

/// Load the caller and require the admin role as currently stored, not as claimed by the token.
async fn require_admin<R: UserRepository>(repo: &R, caller: Uuid) -> Result<User, ApiError> {
    let user = repo
        .find_by_id(caller)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    if !user.role.is_admin() {
        return Err(ApiError::Forbidden);
    }
    Ok(user)
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, caller: Uuid) -> Result<Vec<User>, ApiError> {
        require_admin(&self.repo, caller).await?;
        self.repo.list_all().await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    /// Delete `target` and everything it owns.
    pub async fn execute(&self, caller: Uuid, target: Uuid) -> Result<(), ApiError> {
        require_admin(&self.repo, caller).await?;
        if !self.repo.delete(target).await? {
            return Err(ApiError::UserNotFound);
        }
        tracing::info!(admin_id = %caller, user_id = %target, "account deleted");
        Ok(())
    }
}
