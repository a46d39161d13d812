use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use farmstead_auth_types::token::TokenError;
use farmstead_domain::resource::ResourceKind;

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("invalid path parameter: {0}")]
    InvalidPath(String),
    #[error("referenced field does not exist")]
    InvalidFieldReference,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("{0} not found")]
    NotFound(ResourceKind),
    #[error("email already registered")]
    EmailAlreadyExists,
    #[error("a staff member with this email already exists")]
    StaffEmailAlreadyExists,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::TooLong { .. } => "FIELD_TOO_LONG",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidPath(_) => "INVALID_PATH",
            Self::InvalidFieldReference => "INVALID_FIELD_REFERENCE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound(ResourceKind::Field) => "FIELD_NOT_FOUND",
            Self::NotFound(ResourceKind::Equipment) => "EQUIPMENT_NOT_FOUND",
            Self::NotFound(ResourceKind::Inventory) => "INVENTORY_ITEM_NOT_FOUND",
            Self::NotFound(ResourceKind::Staff) => "STAFF_NOT_FOUND",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::StaffEmailAlreadyExists => "STAFF_EMAIL_ALREADY_EXISTS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_)
            | Self::TooLong { .. }
            | Self::InvalidBody(_)
            | Self::InvalidPath(_)
            | Self::InvalidFieldReference => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmailAlreadyExists | Self::StaffEmailAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        Self::Internal(anyhow::Error::new(e).context("issue session token"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
