//! Gate-resolved identity extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use farmstead_domain::user::Role;

use crate::gate::GateRejection;

/// The caller resolved by the access-control gate from a verified bearer token.
///
/// The gate inserts this into request extensions; handlers take it as an extractor and
/// scope every query by `user_id`. Returns 401 if the request never passed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    // Extract synchronously and return a 'static future; an `async fn` here captures the
    // `parts` borrow and fails to satisfy the trait's `+ Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<Identity>().copied();
        async move { identity.ok_or(GateRejection::MissingAuthorization) }
    }
}
