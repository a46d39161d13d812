//! Access-control gate.
//!
//! Every request is classified against a fixed allow-list of public paths. Public requests
//! pass through untouched. Protected requests must carry `Authorization: Bearer <token>`;
//! the token is verified and the resulting [`Identity`] is attached to the request
//! extensions before any handler runs. All token failures collapse into one generic 401.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::{HeaderMap, StatusCode, header::AUTHORIZATION};

use crate::identity::Identity;
use crate::token::TokenService;

/// Paths reachable without a token.
pub const PUBLIC_PATHS: &[&str] = &["/api/login", "/api/register", "/api/ping", "/healthz", "/readyz"];

/// Outcome of classifying a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// Terminal gate failures.
#[derive(Debug, thiserror::Error)]
pub enum GateRejection {
    #[error("missing authorization")]
    MissingAuthorization,
    #[error("invalid token")]
    InvalidToken,
}

impl GateRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingAuthorization => "MISSING_AUTHORIZATION",
            Self::InvalidToken => "INVALID_TOKEN",
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Classifies requests and resolves bearer tokens into identities.
#[derive(Clone)]
pub struct AccessGate {
    tokens: TokenService,
    public_paths: Arc<[String]>,
}

impl AccessGate {
    pub fn new<I, P>(tokens: TokenService, public_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            tokens,
            public_paths: public_paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Gate with the default [`PUBLIC_PATHS`] allow-list.
    pub fn with_default_paths(tokens: TokenService) -> Self {
        Self::new(tokens, PUBLIC_PATHS.iter().copied())
    }

    /// A path is public when it equals an allow-listed path or continues it with `/`.
    pub fn classify(&self, path: &str) -> Access {
        let public = self.public_paths.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        });
        if public {
            Access::Public
        } else {
            Access::Protected
        }
    }

    /// Resolve the caller of a protected request from its headers.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, GateRejection> {
        if !headers.contains_key(AUTHORIZATION) {
            return Err(GateRejection::MissingAuthorization);
        }
        let Authorization(bearer) = headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(GateRejection::InvalidToken)?;

        let claim = self.tokens.verify(bearer.token()).map_err(|e| {
            tracing::debug!(reason = %e, "bearer token rejected");
            GateRejection::InvalidToken
        })?;

        Ok(Identity {
            user_id: claim.user_id,
            role: claim.role,
        })
    }
}

/// Middleware entry point. Install with `axum::middleware::from_fn_with_state(gate, enforce)`.
pub async fn enforce(State(gate): State<AccessGate>, mut request: Request, next: Next) -> Response {
    if gate.classify(request.uri().path()) == Access::Public {
        return next.run(request).await;
    }
    match gate.authenticate(request.headers()) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(rejection) => rejection.into_response(),
    }
}
