//! CLI administration tool for short-url-registry.
//!
//! Inspects and maintains the `urls` table without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a record without counting an access
//! cargo run --bin admin -- show b7bf24
//!
//! # Delete a record
//! cargo run --bin admin -- delete b7bf24
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Remove every expired record now
//! cargo run --bin admin -- purge-expired
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use short_url_registry::domain::entities::ShortUrl;
use short_url_registry::domain::repositories::ShortUrlRepository;
use short_url_registry::infrastructure::persistence::PgShortUrlRepository;
use short_url_registry::utils::time_format::format_timestamp;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-url-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show a short URL record (does not count as an access)
    Show {
        /// Short code to look up
        code: String,
    },

    /// Permanently delete a short URL
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show totals
    Stats,

    /// Remove all expired records now
    PurgeExpired {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

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
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repo = PgShortUrlRepository::new(Arc::new(pool.clone()));

    match cli.command {
        Commands::Show { code } => show(&repo, &code).await?,
        Commands::Delete { code, yes } => delete(&repo, &code, yes).await?,
        Commands::Stats => handle_stats(&repo, &pool).await?,
        Commands::PurgeExpired { yes } => purge_expired(&repo, &pool, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Prints one record; expired records are flagged, not removed.
async fn show(repo: &PgShortUrlRepository, code: &str) -> Result<()> {
    let record = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(record) = record else {
        println!("{}", format!("Short code {} not found", code).yellow());
        return Ok(());
    };

    print_record(&record);
    Ok(())
}

fn print_record(record: &ShortUrl) {
    let status = if record.is_expired() {
        "EXPIRED".red()
    } else {
        "LIVE".green()
    };

    println!();
    println!("  Code:         {}", record.short_code.bright_yellow().bold());
    println!("  URL:          {}", record.original_url.cyan());
    println!("  Status:       {}", status);
    println!(
        "  Created:      {}",
        format_timestamp(&record.created_at).bright_black()
    );
    println!(
        "  Updated:      {}",
        format_timestamp(&record.last_updated_at).bright_black()
    );
    println!(
        "  Expires:      {}",
        format_timestamp(&record.expiration_date).bright_black()
    );
    println!(
        "  Accesses:     {}",
        record.access_count.to_string().bright_green().bold()
    );
    println!();
}

/// Deletes a record after confirmation.
async fn delete(repo: &PgShortUrlRepository, code: &str, skip_confirm: bool) -> Result<()> {
    let record = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short code not found")?;

    print_record(&record);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete: {}", e))?;

    if deleted {
        println!("{}", "Short URL deleted".green().bold());
    } else {
        println!("{}", "Short URL was already gone".yellow());
    }

    Ok(())
}

/// Displays totals: stored, expired-but-not-yet-removed, and accesses.
async fn handle_stats(repo: &PgShortUrlRepository, pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let expired: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE expiration_date < $1")
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

    let accesses: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(access_count), 0)::BIGINT FROM urls")
            .fetch_one(pool)
            .await?;

    println!("  Short URLs:    {}", total.to_string().bright_green().bold());
    println!("  Expired:       {}", expired.to_string().yellow().bold());
    println!(
        "  Accesses:      {}",
        accesses.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Removes all expired records at once.
///
/// The service only expires lazily; this is the manual counterpart for
/// reclaiming rows nobody touches any more.
async fn purge_expired(repo: &PgShortUrlRepository, pool: &PgPool, skip_confirm: bool) -> Result<()> {
    let now = Utc::now();

    let pending: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE expiration_date < $1")
        .bind(now)
        .fetch_one(pool)
        .await?;

    if pending == 0 {
        println!("{}", "No expired short URLs".green());
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} expired short URLs?", pending))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let removed = repo
        .delete_expired(now)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge: {}", e))?;

    println!(
        "{} {}",
        "Removed".green().bold(),
        format!("{} expired short URLs", removed).bright_white()
    );

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
    }

    Ok(())
}
