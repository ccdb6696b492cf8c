//! CLI for running schema migrations
//!
//! Outputs JSON so deployment tooling can parse the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use referral_core::Config;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Run,

    /// Show applied migrations
    Status,
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<Vec<AppliedMigration>>,
}

#[derive(Serialize, sqlx::FromRow)]
struct AppliedMigration {
    version: i64,
    description: String,
}

async fn connect() -> Result<PgPool> {
    let config = Config::from_env().context("Failed to load configuration")?;
    PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let pool = connect().await?;

    let response = match cli.command {
        Commands::Run => {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Migration failed")?;
            Response {
                success: true,
                message: Some("migrations applied".to_string()),
                applied: None,
            }
        }
        Commands::Status => {
            let applied = sqlx::query_as::<_, AppliedMigration>(
                "SELECT version, description FROM _sqlx_migrations ORDER BY version",
            )
            .fetch_all(&pool)
            .await
            .context("Failed to read migration history")?;
            Response {
                success: true,
                message: None,
                applied: Some(applied),
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
