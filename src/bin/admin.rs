//! CLI administration tool for bizhub.
//!
//! Inspects the assembled modules and performs database operations without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # List modules and registered entity names
//! cargo run --bin admin -- modules
//!
//! # Row counts per table
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string, required by `stats` and `db`

use bizhub::bootstrap;
use bizhub::config::{Config, StorageBackend};
use bizhub::infrastructure::{Backends, database};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;

/// CLI tool for managing bizhub.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// List mounted modules and registered entity names
    Modules,

    /// Show row counts per table
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

/// Tables reported by `stats`, with their display labels.
const TABLES: &[(&str, &str)] = &[
    ("roles", "Roles"),
    ("user_roles", "Role assignments"),
    ("currencies", "Currencies"),
    ("providers", "Providers"),
    ("invoices", "Invoices"),
    ("notifications", "Notifications"),
    ("stored_files", "Files"),
    ("user_relationships", "Relationships"),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Modules => handle_modules()?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let config = Config {
        storage_backend: StorageBackend::Postgres,
        database_url: Some(database_url),
        ..Config::default()
    };

    database::connect(&config).await
}

/// Prints the module catalog the server would mount.
///
/// Assembles the application over the in-memory backend, so registry
/// conflicts surface here exactly as they would at server startup.
fn handle_modules() -> Result<()> {
    let booted = bootstrap::init(&Config::default(), Backends::in_memory())
        .context("Module assembly failed")?;

    println!("{}", "Modules".bright_blue().bold());
    println!();

    for module in booted.state.modules.iter() {
        println!(
            "  {} {} {}",
            format!("{:<16}", module.name).cyan(),
            format!("{:<24}", module.prefix).bright_white(),
            module.tags.join(", ").bright_black()
        );
    }

    println!();
    println!("{}", "Entities".bright_blue().bold());
    println!();

    for name in booted.state.entities.names() {
        println!("  {}", name.green());
    }
    println!();

    Ok(())
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    for (table, label) in TABLES {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .with_context(|| format!("Failed to count {table}"))?;

        println!(
            "  {:<18} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            database::migrate(pool).await?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
