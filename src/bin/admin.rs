//! CLI administration tool for car-rental.
//!
//! Issues bearer tokens, shows record counts and performs database checks
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Issue a token for a user (prompts for the user id when omitted)
//! cargo run --bin admin -- token issue --user alice --ttl-hours 24
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `JWT_SECRET` (required for `token`): must match the server's secret
//! - `DATABASE_URL` or `DB_*` components (required for `stats` and `db`)

use car_rental::application::services::AuthService;
use car_rental::config::Config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;

/// CLI tool for managing car-rental.
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
    /// Manage bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show record counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Sign a token for a user
    Issue {
        /// User id placed in the `sub` claim
        #[arg(short, long)]
        user: Option<String>,

        /// Token lifetime in hours
        #[arg(short, long, default_value_t = 24)]
        ttl_hours: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches token commands.
fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue { user, ttl_hours } => issue_token(user, ttl_hours),
    }
}

/// Signs a bearer token with the server secret.
///
/// Tokens are stateless: nothing is stored, and a token stays valid until
/// it expires or `JWT_SECRET` is rotated.
fn issue_token(user: Option<String>, ttl_hours: i64) -> Result<()> {
    println!("{}", "🔑 Issue Bearer Token".bright_blue().bold());
    println!();

    if ttl_hours <= 0 {
        anyhow::bail!("--ttl-hours must be greater than 0");
    }

    let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    if secret.trim().is_empty() {
        anyhow::bail!("JWT_SECRET must not be empty");
    }

    let user_id = match user {
        Some(u) => u,
        None => Input::new().with_prompt("User id").interact_text()?,
    };
    let user_id = user_id.trim().to_string();
    if user_id.is_empty() {
        anyhow::bail!("User id must not be empty");
    }

    let token = AuthService::new(&secret)
        .issue(&user_id, chrono::Duration::hours(ttl_hours))
        .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))?;

    println!("{}", "Token details:".bright_white().bold());
    println!("  User:    {}", user_id.cyan());
    println!("  Expires: {}", format!("in {ttl_hours}h").bright_black());
    println!("  Token:   {}", token.bright_yellow().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/rents",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Displays counts of live (non-deleted) records per collection.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    for (label, table) in [
        ("Brands", "brands"),
        ("Types", "car_types"),
        ("Cars", "cars"),
        ("Rents", "rents"),
    ] {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table} WHERE is_deleted = FALSE"
        ))
        .fetch_one(pool)
        .await?;

        println!(
            "  {:<8} {}",
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
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
