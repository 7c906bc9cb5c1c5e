//! CLI administration tool for link-shortener.
//!
//! Runs the configured codec offline and inspects or removes links directly
//! in PostgreSQL without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Encode an identifier / decode a code with the configured salt
//! cargo run --bin admin -- encode 42
//! cargo run --bin admin -- decode n4lm9
//!
//! # Generate a fresh salt
//! cargo run --bin admin -- salt --length 32
//!
//! # Inspect and delete links
//! cargo run --bin admin -- link show n4lm9
//! cargo run --bin admin -- link delete n4lm9
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
//! - `CODE_SALT` (required), `CODE_MIN_LENGTH`, `CODE_ALPHABET`: codec settings
//! - `DATABASE_URL` or `DB_*`: required by `link`, `stats` and `db`

use link_shortener::application::services::LinkService;
use link_shortener::config::{self, CodecSettings, Config, StorageBackend};
use link_shortener::domain::codec::Codec;
use link_shortener::domain::entities::Link;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
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
    /// Encode an identifier into a short code
    Encode {
        /// Non-negative link identifier
        id: u64,
    },

    /// Decode a short code back into its identifier
    Decode {
        /// Short code
        code: String,
    },

    /// Generate a random salt suitable for CODE_SALT
    Salt {
        /// Salt length in characters
        #[arg(short, long, default_value_t = 32)]
        length: usize,
    },

    /// Inspect or delete links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show link statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a live link
    Show {
        /// Short code
        code: String,

        /// Look up the stored code directly instead of decoding it
        #[arg(long)]
        raw: bool,
    },

    /// Soft-delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { id } => encode(id)?,
        Commands::Decode { code } => decode(&code)?,
        Commands::Salt { length } => salt(length)?,
        Commands::Link { action } => handle_link_action(action).await?,
        Commands::Stats => handle_stats().await?,
        Commands::Db { action } => handle_db_action(action).await?,
    }

    Ok(())
}

/// Builds the codec from `CODE_SALT`, `CODE_MIN_LENGTH` and `CODE_ALPHABET`
/// without requiring database settings.
fn codec_from_env() -> Result<Codec> {
    CodecSettings::from_env()?.validate()
}

fn encode(id: u64) -> Result<()> {
    let codec = codec_from_env()?;

    println!("{}", codec.encode(id).bright_yellow().bold());

    Ok(())
}

fn decode(code: &str) -> Result<()> {
    let codec = codec_from_env()?;

    let id = codec
        .decode(code)
        .with_context(|| format!("'{}' is not a valid code", code))?;

    println!("{}", id.to_string().bright_green().bold());

    Ok(())
}

/// Prints a random alphanumeric salt.
fn salt(length: usize) -> Result<()> {
    use rand::Rng;
    use rand::distr::Alphanumeric;

    if length == 0 {
        anyhow::bail!("Salt length must be at least 1");
    }

    let salt: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();

    println!("{}", salt.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  Changing CODE_SALT invalidates every code already issued."
            .red()
            .bold()
    );

    Ok(())
}

/// Loads configuration and connects to PostgreSQL.
async fn connect() -> Result<(Config, PgPool)> {
    let config = config::load_from_env()?;

    if config.storage != StorageBackend::Postgres {
        anyhow::bail!("Admin link commands require STORAGE=postgres");
    }

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok((config, pool))
}

/// Dispatches link commands through the same service the server uses.
async fn handle_link_action(action: LinkAction) -> Result<()> {
    let (config, pool) = connect().await?;

    let repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let service = LinkService::new(
        repository.clone(),
        config.codec.build()?,
        config.id_strategy,
        config.base_url.clone(),
    );

    match action {
        LinkAction::Show { code, raw } => {
            let link = if raw {
                repository
                    .find_by_code(&code)
                    .await
                    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            } else {
                found(service.resolve(&code).await)?
            };

            match link {
                Some(link) => print_link(&link, &service.short_url(&link.code)),
                None => println!("{}", "⚠️  Link not found".yellow()),
            }
        }
        LinkAction::Delete { code, yes } => {
            let Some(link) = found(service.resolve(&code).await)? else {
                println!("{}", "⚠️  Link not found".yellow());
                return Ok(());
            };

            println!("{}", "🗑  Delete Link".bright_blue().bold());
            println!();
            print_link(&link, &service.short_url(&link.code));

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this link?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            service
                .remove(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

            println!("{}", "✅ Link deleted".green().bold());
        }
    }

    Ok(())
}

/// Maps `NotFound` to `None` and other service errors to an `anyhow` error.
fn found(result: Result<Link, AppError>) -> Result<Option<Link>> {
    match result {
        Ok(link) => Ok(Some(link)),
        Err(AppError::NotFound) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }
}

fn print_link(link: &Link, short_url: &str) {
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Code:      {}", link.code.cyan());
    println!("  Short URL: {}", short_url.bright_white());
    println!("  Source:    {}", link.source.bright_white());
    println!(
        "  Created:   {}",
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Displays link counts.
///
/// Shows:
/// - Total links ever issued
/// - Live links
/// - Soft-deleted links
async fn handle_stats() -> Result<()> {
    let (_, pool) = connect().await?;
    let repository = PgLinkRepository::new(Arc::new(pool));

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total = repository
        .count_all()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    let deleted = repository
        .count_deleted()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("  Total:   {}", total.to_string().bright_green().bold());
    println!(
        "  Live:    {}",
        (total - deleted).to_string().bright_green().bold()
    );
    println!("  Deleted: {}", deleted.to_string().bright_black());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let (_, pool) = connect().await?;
            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
