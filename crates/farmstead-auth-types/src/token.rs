//! Bearer-token issuance and validation (HS256 JWT).

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use farmstead_domain::user::Role;

/// Default session lifetime (1 day).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(86_400);

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `role` | custom | `"user"` or `"admin"` |
/// | `email` | custom | login email at issuance time |
/// | `iat` | `iat` | issued-at, seconds since epoch |
/// | `exp` | `exp` | expiry, seconds since epoch |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: u64,
    pub exp: u64,
}

/// Identity extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub user_id: Uuid,
    pub role: Role,
    pub email: Option<String>,
    pub expires_at: u64,
}

/// A freshly signed token and its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

/// Errors returned by [`TokenService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing,
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Signs and verifies session tokens with the process-wide secret.
///
/// Constructed once at startup. Rotating the secret invalidates every token issued before.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token with the configured lifetime.
    pub fn issue(&self, user_id: Uuid, role: Role, email: &str) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(user_id, role, email, self.ttl)
    }

    /// Issue a token expiring at `now + ttl`.
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        role: Role,
        email: &str,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let iat = now_secs();
        let exp = iat.saturating_add(ttl.as_secs());
        let claims = JwtClaims {
            sub: user_id.to_string(),
            role,
            email: Some(email.to_owned()),
            iat,
            exp,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "jwt encode failed");
            TokenError::Signing
        })?;
        Ok(IssuedToken {
            token,
            expires_at: exp,
        })
    }

    /// Verify a token against the current clock.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        self.verify_at(token, now_secs())
    }

    /// Verify a token as of `now` (seconds since epoch).
    ///
    /// Order: signature, then expiry (`now >= exp` is expired, no leeway), then claim
    /// extraction.
    pub fn verify_at(&self, token: &str, now: u64) -> Result<IdentityClaim, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below with an exclusive bound; the library check allows `exp == now`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<JwtClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
                | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;

        let claims = data.claims;
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| TokenError::Malformed)?;

        Ok(IdentityClaim {
            user_id,
            role: claims.role,
            email: claims.email,
            expires_at: claims.exp,
        })
    }
}
