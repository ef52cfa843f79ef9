//! CLI administration tool for link-mapper.
//!
//! Works directly against the PostgreSQL store, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten https://example.com/page --alias mylink
//!
//! # Show one link
//! cargo run --bin admin -- lookup mylink
//!
//! # List the most recent links, or the most clicked ones
//! cargo run --bin admin -- recent --limit 20
//! cargo run --bin admin -- recent --sort clicks
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! `DATABASE_URL` or `DB_USER`/`DB_PASSWORD`/`DB_NAME` (required), plus
//! `BASE_URL`, `SHORT_CODE_LENGTH` and `CODE_MAX_ATTEMPTS` as for the server.

use link_mapper::application::services::{LinkService, StatsService};
use link_mapper::config::{Config, mask_connection_string};
use link_mapper::domain::entities::Link;
use link_mapper::domain::repositories::{LinkRepository, OrderBy, SortDirection};
use link_mapper::infrastructure::persistence::PgLinkRepository;
use link_mapper::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-mapper.
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
    /// Create a short link
    Shorten {
        /// Destination URL (prompted if omitted)
        url: Option<String>,

        /// Custom short code
        #[arg(short, long)]
        alias: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a single link by code
    Lookup {
        code: String,
    },

    /// List links, newest first by default
    Recent {
        /// Number of links to show (1-100)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Sort key
        #[arg(short, long, value_enum, default_value_t = SortKey::Created)]
        sort: SortKey,

        /// Lowest values first
        #[arg(short, long)]
        reverse: bool,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Sort keys for `recent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortKey {
    /// Creation time
    Created,
    /// Click count
    Clicks,
    /// Last redirect time
    Accessed,
}

impl From<SortKey> for OrderBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Created => OrderBy::CreatedAt,
            SortKey::Clicks => OrderBy::ClickCount,
            SortKey::Accessed => OrderBy::LastAccessedAt,
        }
    }
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;

    let pool = connect_pool(&config).await?;
    let repository: Arc<dyn LinkRepository> =
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Shorten { url, alias, yes } => {
            let service = LinkService::new(repository, config.code_settings(), &config.base_url);
            shorten(&service, url, alias, yes).await?
        }
        Commands::Lookup { code } => lookup(repository.as_ref(), &config.base_url, &code).await?,
        Commands::Recent {
            limit,
            sort,
            reverse,
        } => {
            let service = LinkService::new(repository, config.code_settings(), &config.base_url);
            let direction = if reverse {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            };
            recent(
                &service,
                sort.into(),
                direction,
                limit.unwrap_or(config.recent_links_limit),
            )
            .await?
        }
        Commands::Stats => stats(&StatsService::new(repository)).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

/// Issues a short link with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the destination (or use the argument)
/// 2. Show what will be created
/// 3. Confirm (unless `--yes`)
/// 4. Issue through [`LinkService`], the same path the API uses
async fn shorten(
    service: &LinkService<dyn LinkRepository>,
    url: Option<String>,
    alias: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Destination URL")
            .with_initial_text("https://")
            .interact_text()?,
    };
    let url = url.trim().to_string();
    let alias = alias
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());

    println!("  Destination: {}", url.cyan());
    match alias {
        Some(ref a) => println!("  Alias:       {}", a.cyan()),
        None => println!("  Alias:       {}", "(generated)".bright_black()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let issued = service
        .issue_short_link(&url, alias.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!();
    if issued.created {
        println!("{}", "✅ Link created".green().bold());
    } else {
        println!(
            "{}",
            "♻️  Destination already shortened, reusing existing link".yellow()
        );
    }
    println!(
        "  {}",
        service.short_url(&issued.link.code).bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Prints every field of one link.
async fn lookup(repository: &dyn LinkRepository, base_url: &str, code: &str) -> Result<()> {
    let link = repository
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No link with code '{}'", code))?;

    println!("{}", "🔎 Link".bright_blue().bold());
    println!();
    println!("  Code:          {}", link.code.cyan());
    println!(
        "  Short URL:     {}",
        format!("{}/{}", base_url.trim_end_matches('/'), link.code).bright_yellow()
    );
    println!("  Destination:   {}", link.destination_url);
    println!(
        "  Domain:        {}",
        link.domain.as_deref().unwrap_or("-").bright_black()
    );
    println!(
        "  Clicks:        {}",
        link.click_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:       {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Last accessed: {}",
        link.last_accessed_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
            .bright_black()
    );
    println!(
        "  Custom alias:  {}",
        if link.is_custom_alias { "yes" } else { "no" }
    );
    println!();

    Ok(())
}

/// Lists links in the requested order.
///
/// # Output Format
///
/// ```text
/// 📋 Recent Links
///
///   Code         Clicks   Created            Destination
///   ─────────────────────────────────────────────────────────────────────
///   mylink       12       2026-01-15 10:30   https://example.com/page
/// ```
async fn recent(
    service: &LinkService<dyn LinkRepository>,
    order_by: OrderBy,
    direction: SortDirection,
    limit: usize,
) -> Result<()> {
    println!("{}", "📋 Recent Links".bright_blue().bold());
    println!();

    let links = service
        .list_links(order_by, direction, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        print_row(link);
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

fn print_row(link: &Link) {
    let code = if link.is_custom_alias {
        link.code.cyan()
    } else {
        link.code.normal()
    };

    println!(
        "  {:<12} {:<8} {:<18} {}",
        code,
        link.click_count.to_string().bright_green(),
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        truncate(&link.destination_url, 60)
    );
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }

    let head: String = value.chars().take(max_chars - 1).collect();
    format!("{head}…")
}

/// Displays link and click totals.
async fn stats(service: &StatsService<dyn LinkRepository>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let totals = service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:  {}",
        totals.total_links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        totals.total_clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            if let Some(ref url) = config.database_url {
                println!("  {}", mask_connection_string(url).bright_black());
            }

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "🛠️  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
