#![allow(async_fn_in_trait)]

use uuid::Uuid;

use farmstead_domain::user::Role;

use crate::domain::types::{OwnedRecord, User};
use crate::error::ApiError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    /// Fails with `EmailAlreadyExists` if the email is taken.
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn list_all(&self) -> Result<Vec<User>, ApiError>;
    /// Delete an account and every record it owns. Returns `true` if the account existed.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Returns `true` if a row was updated.
    async fn set_role(&self, id: Uuid, role: Role) -> Result<bool, ApiError>;
}

/// Repository for one kind of owned record. Every query is scoped to `owner`.
pub trait OwnedRepository: Send + Sync {
    type Record: OwnedRecord;

    async fn list(&self, owner: Uuid) -> Result<Vec<Self::Record>, ApiError>;
    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<Self::Record>, ApiError>;
    async fn insert(&self, record: &Self::Record) -> Result<(), ApiError>;
    async fn update(&self, record: &Self::Record) -> Result<(), ApiError>;
    /// Returns `true` if a row owned by `owner` was deleted.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, ApiError>;
    /// Whether the owning account still exists.
    async fn owner_exists(&self, owner: Uuid) -> Result<bool, ApiError>;
    /// Name of the field `field_id` if it exists and belongs to `owner`.
    async fn field_name(&self, owner: Uuid, field_id: Uuid) -> Result<Option<String>, ApiError>;
}

/// Slow one-way hashing of account secrets.
pub trait SecretHasher: Send + Sync {
    /// Hash with a fresh random salt into a PHC string.
    fn hash(&self, secret: &str) -> Result<String, ApiError>;
    /// Verify `secret` against `phc`. With `None`, still performs one verification against
    /// a dummy hash and returns `false`.
    fn verify(&self, secret: &str, phc: Option<&str>) -> bool;
}
