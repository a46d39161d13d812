//! Owner-scoped CRUD shared by every resource kind.
//!
//! The owner is always the gate-resolved caller; request bodies never carry one.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::OwnedRepository;
use crate::domain::types::OwnedRecord;
use crate::error::ApiError;

/// Request payload that can become a new record.
pub trait Draft<T> {
    fn into_record(self, owner: Uuid, now: DateTime<Utc>) -> Result<T, ApiError>;
}

/// Partial update. Absent keys leave the record untouched.
pub trait Changes<T> {
    fn apply(self, record: &mut T) -> Result<(), ApiError>;
}

/// Column widths shared by several record kinds, in characters.
pub(crate) const NAME_LEN: usize = 100;
pub(crate) const EMAIL_LEN: usize = 120;
pub(crate) const STATUS_LEN: usize = 20;

/// Reject text wider than the column that stores it.
pub(crate) fn bounded(value: String, name: &'static str, max: usize) -> Result<String, ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::TooLong { field: name, max });
    }
    Ok(value)
}

/// A mandatory text attribute. Blank counts as missing.
pub(crate) fn required_text(
    value: Option<String>,
    name: &'static str,
    max: usize,
) -> Result<String, ApiError> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ApiError::MissingField(name))?;
    bounded(value, name, max)
}

pub(crate) fn optional_text(
    value: Option<String>,
    name: &'static str,
    max: usize,
) -> Result<Option<String>, ApiError> {
    value.map(|v| bounded(v, name, max)).transpose()
}

/// A text attribute that falls back to `default` when absent or blank.
pub(crate) fn text_or(
    value: Option<String>,
    default: &str,
    name: &'static str,
    max: usize,
) -> Result<String, ApiError> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => bounded(value, name, max),
        None => Ok(default.to_owned()),
    }
}

pub(crate) fn required<T>(value: Option<T>, name: &'static str) -> Result<T, ApiError> {
    value.ok_or(ApiError::MissingField(name))
}

/// Overwrite a mandatory text attribute if a new non-blank value was sent.
pub(crate) fn replace_text(
    target: &mut String,
    value: Option<String>,
    name: &'static str,
    max: usize,
) -> Result<(), ApiError> {
    if value.is_some() {
        *target = required_text(value, name, max)?;
    }
    Ok(())
}

pub(crate) fn replace_opt_text(
    target: &mut Option<String>,
    value: Option<String>,
    name: &'static str,
    max: usize,
) -> Result<(), ApiError> {
    replace_opt(target, optional_text(value, name, max)?);
    Ok(())
}

pub(crate) fn replace<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

pub(crate) fn replace_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// A still-valid token may belong to an account that has since been deleted.
async fn require_owner<R: OwnedRepository>(repo: &R, owner: Uuid) -> Result<(), ApiError> {
    if repo.owner_exists(owner).await? {
        Ok(())
    } else {
        Err(ApiError::UserNotFound)
    }
}

fn not_found<R: OwnedRepository>() -> ApiError {
    ApiError::NotFound(<R::Record as OwnedRecord>::KIND)
}

/// Check the record's field reference against the owner and attach the field's name.
async fn resolve_field_ref<R: OwnedRepository>(
    repo: &R,
    owner: Uuid,
    record: &mut R::Record,
) -> Result<(), ApiError> {
    let name = match record.field_ref() {
        Some(field_id) => Some(
            repo.field_name(owner, field_id)
                .await?
                .ok_or(ApiError::InvalidFieldReference)?,
        ),
        None => None,
    };
    record.set_field_name(name);
    Ok(())
}

// ── ListRecords ──────────────────────────────────────────────────────────────

pub struct ListRecordsUseCase<R: OwnedRepository> {
    pub repo: R,
}

impl<R: OwnedRepository> ListRecordsUseCase<R> {
    pub async fn execute(&self, owner: Uuid) -> Result<Vec<R::Record>, ApiError> {
        self.repo.list(owner).await
    }
}

// ── GetRecord ────────────────────────────────────────────────────────────────

pub struct GetRecordUseCase<R: OwnedRepository> {
    pub repo: R,
}

impl<R: OwnedRepository> GetRecordUseCase<R> {
    pub async fn execute(&self, owner: Uuid, id: Uuid) -> Result<R::Record, ApiError> {
        self.repo.find(owner, id).await?.ok_or_else(not_found::<R>)
    }
}

// ── CreateRecord ─────────────────────────────────────────────────────────────

pub struct CreateRecordUseCase<R: OwnedRepository> {
    pub repo: R,
}

impl<R: OwnedRepository> CreateRecordUseCase<R> {
    pub async fn execute<D>(&self, owner: Uuid, draft: D) -> Result<R::Record, ApiError>
    where
        D: Draft<R::Record>,
    {
        require_owner(&self.repo, owner).await?;
        let mut record = draft.into_record(owner, Utc::now())?;
        resolve_field_ref(&self.repo, owner, &mut record).await?;
        self.repo.insert(&record).await?;
        Ok(record)
    }
}

// ── UpdateRecord ─────────────────────────────────────────────────────────────

pub struct UpdateRecordUseCase<R: OwnedRepository> {
    pub repo: R,
}

impl<R: OwnedRepository> UpdateRecordUseCase<R> {
    pub async fn execute<C>(&self, owner: Uuid, id: Uuid, changes: C) -> Result<R::Record, ApiError>
    where
        C: Changes<R::Record>,
    {
        require_owner(&self.repo, owner).await?;
        let mut record = self.repo.find(owner, id).await?.ok_or_else(not_found::<R>)?;
        changes.apply(&mut record)?;
        record.touch(Utc::now());
        resolve_field_ref(&self.repo, owner, &mut record).await?;
        self.repo.update(&record).await?;
        Ok(record)
    }
}

// ── DeleteRecord ─────────────────────────────────────────────────────────────

pub struct DeleteRecordUseCase<R: OwnedRepository> {
    pub repo: R,
}

impl<R: OwnedRepository> DeleteRecordUseCase<R> {
    pub async fn execute(&self, owner: Uuid, id: Uuid) -> Result<(), ApiError> {
        if self.repo.delete(owner, id).await? {
            Ok(())
        } else {
            Err(not_found::<R>())
        }
    }
}
