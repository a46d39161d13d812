//! Mock auth helpers for integration tests.
//!
//! Protected routes expect `Authorization: Bearer <token>` signed with the server secret.
//! `MockAuth` signs tokens with [`TEST_JWT_SECRET`] so tests can skip the login round trip,
//! or craft tokens a real login would never hand out (expired, wrong role, foreign secret).

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use farmstead_auth_types::token::{DEFAULT_TOKEN_TTL, TokenService};
use farmstead_domain::user::Role;
use uuid::Uuid;

/// Secret shared by test servers and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "farmstead-test-secret";

/// Configurable identity presented by test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: Role,
    pub email: String,
    secret: String,
    ttl: Duration,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            role,
            email: format!("{user_id}@test.local"),
            secret: TEST_JWT_SECRET.to_owned(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Sign with a different secret, producing a token the server must reject.
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_owned();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// A signed bearer token for this identity.
    pub fn token(&self) -> String {
        TokenService::new(&self.secret, self.ttl)
            .issue(self.user_id, self.role, &self.email)
            .expect("signing test token")
            .token
    }

    /// `Authorization` header value for this identity.
    pub fn bearer(&self) -> HeaderValue {
        bearer(&self.token())
    }

    /// Return headers as if the client had logged in.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.bearer());
        map
    }
}

/// `Bearer <token>` header value.
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("token is a valid header value")
}
