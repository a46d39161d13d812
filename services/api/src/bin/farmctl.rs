//! Account maintenance for operators.
//!
//! ```text
//! farmctl create-admin --email root@farm.example --password '…' [--name Admin]
//! farmctl promote --email someone@farm.example
//! ```

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::Database;

use farmstead_api::infra::db::DbUserRepository;
use farmstead_api::infra::password::Argon2SecretHasher;
use farmstead_api::usecase::credential::{PromoteUseCase, RegisterInput, RegisterUseCase};
use farmstead_api_migration::{Migrator, MigratorTrait};
use farmstead_core::tracing::init_tracing;
use farmstead_domain::user::Role;

#[derive(Parser)]
#[command(name = "farmctl", about = "Farmstead account administration")]
struct Cli {
    /// Database connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new account with the admin role.
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "Admin")]
        name: String,
    },
    /// Grant the admin role to an existing account.
    Promote {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;
    let repo = DbUserRepository { db };

    match cli.command {
        Command::CreateAdmin {
            email,
            password,
            name,
        } => {
            let usecase = RegisterUseCase {
                repo,
                hasher: Argon2SecretHasher::new()?,
            };
            let user = usecase
                .execute(RegisterInput {
                    name: Some(name),
                    last_name: None,
                    email: Some(email),
                    secret: Some(password),
                    role: Role::Admin,
                })
                .await
                .context("create-admin failed")?;
            println!("created admin {} ({})", user.email, user.id);
        }
        Command::Promote { email } => {
            let usecase = PromoteUseCase { repo };
            let user = usecase
                .execute(&email)
                .await
                .context("promote failed")?;
            println!("promoted {} ({}) to {}", user.email, user.id, user.role);
        }
    }
    Ok(())
}
