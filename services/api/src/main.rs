use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use farmstead_api::config::ApiConfig;
use farmstead_api::infra::password::Argon2SecretHasher;
use farmstead_api::router::build_router;
use farmstead_api::state::AppState;
use farmstead_api_migration::{Migrator, MigratorTrait};
use farmstead_auth_types::token::TokenService;
use farmstead_core::middleware::cors_layer;
use farmstead_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ApiConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    let state = AppState {
        db,
        tokens: TokenService::new(&config.jwt_secret, config.token_ttl),
        hasher: Argon2SecretHasher::new()?,
    };
    let cors = cors_layer(&config.cors_origin)?;

    let token_ttl = state.tokens.ttl();
    let router = build_router(state, cors);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        token_ttl_secs = token_ttl.as_secs(),
        "api service listening"
    );
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
