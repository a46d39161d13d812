use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand_core::OsRng;

use crate::domain::repository::SecretHasher;
use crate::error::ApiError;

const DUMMY_SECRET: &[u8] = b"farmstead-dummy-secret";

/// Argon2id secret hasher.
///
/// Holds a precomputed hash of a throwaway secret so that a login for an unknown email
/// costs one full verification, the same as a login with a wrong secret.
#[derive(Clone)]
pub struct Argon2SecretHasher {
    argon2: Arc<Argon2<'static>>,
    dummy_hash: Arc<str>,
}

impl Argon2SecretHasher {
    /// Hasher with the library's recommended Argon2id parameters.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_params(Params::default())
    }

    pub fn with_params(params: Params) -> anyhow::Result<Self> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(DUMMY_SECRET, &salt)
            .map_err(|e| anyhow::anyhow!("hash dummy secret: {e}"))?
            .to_string();
        Ok(Self {
            argon2: Arc::new(argon2),
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Minimal-cost parameters for tests.
    pub fn fast() -> anyhow::Result<Self> {
        let params =
            Params::new(Params::MIN_M_COST, 1, 1, None).map_err(|e| anyhow::anyhow!("{e}"))?;
        Self::with_params(params)
    }
}

impl SecretHasher for Argon2SecretHasher {
    fn hash(&self, secret: &str) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("hash secret: {e}"))?;
        Ok(hash.to_string())
    }

    fn verify(&self, secret: &str, phc: Option<&str>) -> bool {
        let (candidate, known) = match phc {
            Some(phc) => (phc, true),
            None => (&*self.dummy_hash, false),
        };
        let parsed = match PasswordHash::new(candidate) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(error = %e, "stored password hash is not a valid PHC string");
                return false;
            }
        };
        let matches = self
            .argon2
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok();
        known && matches
    }
}
