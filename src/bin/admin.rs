//! CLI administration tool for url-shortener.
//!
//! Provides commands for inspecting and managing short links without
//! going through the HTTP API. Every operation goes through the same
//! services as the server, so validation, timeouts and cache invalidation
//! behave identically.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # List the newest links
//! cargo run --bin admin -- links list --page 1 --limit 20
//!
//! # Delete a link
//! cargo run --bin admin -- links delete aB3dE6gH
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `url_shortener::config`); at minimum `DATABASE_URL`
//! or the `DB_*` components.

use url_shortener::application::services::{LinkServiceOptions, PageRequest};
use url_shortener::config::{self, Config};
use url_shortener::domain::click_event::ClickEvent;
use url_shortener::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};
use url_shortener::server::{connect_cache, connect_pool};
use url_shortener::{AppError, AppState};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing url-shortener.
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
    /// Show total links and clicks
    Stats,

    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List links, newest first
    List {
        /// Page number (starting at 1)
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        /// Links per page (max 100)
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },

    /// Delete a link by short ID
    Delete {
        /// Short ID to delete
        short_id: String,

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

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Stats => handle_stats(&build_state(&config, &pool).await).await?,
        Commands::Links { action } => {
            handle_links_action(action, &build_state(&config, &pool).await).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Wires the services the same way the server does.
///
/// The click queue is never read: the CLI does not resolve links.
async fn build_state(config: &Config, pool: &PgPool) -> AppState {
    let pool = Arc::new(pool.clone());
    let (click_tx, _click_rx) = mpsc::channel::<ClickEvent>(1);

    AppState::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgStatsRepository::new(pool)),
        connect_cache(config).await,
        click_tx,
        LinkServiceOptions {
            public_scheme: config.public_scheme.clone(),
            public_host: config.public_host.clone(),
            store_timeout: config.store_timeout(),
        },
    )
}

/// Displays store-wide totals.
async fn handle_stats(state: &AppState) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let analytics = state.stats_service.analytics().await.map_err(describe)?;

    println!(
        "  Links:  {}",
        analytics.total_urls.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        analytics.total_clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, state: &AppState) -> Result<()> {
    match action {
        LinksAction::List { page, limit } => list_links(state, page, limit).await,
        LinksAction::Delete { short_id, yes } => delete_link(state, short_id, yes).await,
    }
}

async fn list_links(state: &AppState, page: i64, limit: i64) -> Result<()> {
    let page = PageRequest::normalize(Some(page), Some(limit));

    println!(
        "{}",
        format!("🔗 Links (page {}, {} per page)", page.page, page.limit)
            .bright_blue()
            .bold()
    );
    println!();

    let mappings = state.link_service.list(page).await.map_err(describe)?;

    if mappings.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    for mapping in mappings {
        println!(
            "  {}  {}  {}",
            mapping.short_id.cyan().bold(),
            format!("{:>6} clicks", mapping.clicks).bright_green(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
        println!("    {}", mapping.original_url);
        println!(
            "    {}",
            state.link_service.short_url(&mapping.short_id).bright_white()
        );
    }
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(state: &AppState, short_id: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();
    println!("  Short ID: {}", short_id.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match state.link_service.delete(&short_id).await {
        Ok(()) => {
            println!("{}", "✅ Short URL deleted successfully".green().bold());
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", "⚠️  No link with this short ID".yellow());
        }
        Err(e) => return Err(describe(e)),
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
            let mappings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL:   {}", version.bright_white());
            println!("  url_mappings: {} rows", mappings.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Converts a service error into a CLI error, keeping the underlying cause.
///
/// Unlike HTTP responses, the operator sees store failure details.
fn describe(e: AppError) -> anyhow::Error {
    anyhow::anyhow!("{}", e)
}
