use std::time::Duration;

use anyhow::Context as _;

use farmstead_auth_types::token::DEFAULT_TOKEN_TTL;

pub const DEFAULT_API_PORT: u16 = 3001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// Database connection URL (`postgres://…` or `sqlite://…`).
    pub database_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3001). Env var: `API_PORT`.
    pub api_port: u16,
    /// Single origin allowed by CORS. Env var: `CORS_ORIGIN`.
    pub cors_origin: String,
    /// Session token lifetime. Env var: `TOKEN_TTL_SECS` (default 1 day).
    pub token_ttl: Duration,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET is not set")?;
        let api_port = match lookup("API_PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("API_PORT is not a port number: {v}"))?,
            None => DEFAULT_API_PORT,
        };
        let token_ttl = match lookup("TOKEN_TTL_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .with_context(|| format!("TOKEN_TTL_SECS is not a number: {v}"))?,
            ),
            None => DEFAULT_TOKEN_TTL,
        };
        Ok(Self {
            database_url,
            jwt_secret,
            api_port,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_owned()),
            token_ttl,
        })
    }
}
