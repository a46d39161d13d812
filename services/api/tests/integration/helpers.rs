use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use axum_test::TestServer;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use uuid::Uuid;

use farmstead_api::infra::password::Argon2SecretHasher;
use farmstead_api::router::build_router;
use farmstead_api::state::AppState;
use farmstead_api_migration::{Migrator, MigratorTrait};
use farmstead_auth_types::token::{DEFAULT_TOKEN_TTL, TokenService};
use farmstead_core::middleware::cors_layer;
use farmstead_testing::auth::{TEST_JWT_SECRET, bearer};
use farmstead_testing::fixture::{login_body, register_body};

pub const TEST_ORIGIN: &str = "http://localhost:3000";
pub const TEST_SECRET: &str = "correct horse battery staple";

/// Full router over a fresh, migrated in-memory SQLite database.
pub async fn test_app() -> (TestServer, DatabaseConnection) {
    // One connection: every pooled connection to `:memory:` would be a separate database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    let state = AppState {
        db: db.clone(),
        tokens: TokenService::new(TEST_JWT_SECRET, DEFAULT_TOKEN_TTL),
        hasher: Argon2SecretHasher::fast().expect("build hasher"),
    };
    let router = build_router(state, cors_layer(TEST_ORIGIN).expect("valid origin"));
    (TestServer::new(router).expect("build test server"), db)
}

pub async fn test_server() -> TestServer {
    test_app().await.0
}

/// A logged-in account.
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl Account {
    pub fn auth(&self) -> (HeaderName, HeaderValue) {
        (AUTHORIZATION, bearer(&self.token))
    }
}

pub async fn register(server: &TestServer, email: &str) -> Value {
    let response = server
        .post("/api/register")
        .json(&register_body("Test User", email, TEST_SECRET))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn login(server: &TestServer, email: &str) -> Value {
    let response = server
        .post("/api/login")
        .json(&login_body(email, TEST_SECRET))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Register and log in.
pub async fn sign_up(server: &TestServer, email: &str) -> Account {
    let registered = register(server, email).await;
    let session = login(server, email).await;
    Account {
        id: registered["id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("registered id is a uuid"),
        email: email.to_owned(),
        token: session["access_token"]
            .as_str()
            .expect("access token")
            .to_owned(),
    }
}

/// POST a record and return its JSON.
pub async fn create(server: &TestServer, account: &Account, path: &str, body: &Value) -> Value {
    let (name, value) = account.auth();
    let response = server.post(path).add_header(name, value).json(body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub fn id_of(record: &Value) -> String {
    record["id"].as_str().expect("record id").to_owned()
}
