//! CLI administration tool for link-qr.
//!
//! Manages workspaces, short links and embed tokens directly in the database,
//! and explains the branding decision for a URL.
//!
//! # Usage
//!
//! ```bash
//! # Workspaces
//! cargo run --bin admin -- workspace list
//! cargo run --bin admin -- workspace create --name Acme --plan pro
//! cargo run --bin admin -- workspace plan 3 business
//! cargo run --bin admin -- workspace logo 3 https://cdn.example.com/acme.png
//! cargo run --bin admin -- workspace logo 3 --clear
//!
//! # Short links
//! cargo run --bin admin -- link add --domain s.example.com --key promo --url https://example.com --workspace 3
//! cargo run --bin admin -- link inspect "https://s.example.com/promo?utm_source=qr"
//!
//! # Embed tokens
//! cargo run --bin admin -- embed token 42 --ttl-days 30
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`DATABASE_URL` or `DB_*`, optional `REDIS_URL`,
//! `QR_DEFAULT_LOGO`). Workspace and link changes invalidate the
//! corresponding cache entries when Redis is configured.

use link_qr::config::{self, Config};
use link_qr::domain::branding::{EffectiveLogo, LinkOwnership, resolve_logo};
use link_qr::domain::entities::{NewShortLink, NewWorkspace, Plan, UpdateWorkspace};
use link_qr::domain::repositories::{ShortLinkRepository, WorkspaceRepository};
use link_qr::infrastructure::cache::{CacheService, link_key, workspace_key};
use link_qr::infrastructure::persistence::{
    PgEmbedRepository, PgShortLinkRepository, PgWorkspaceRepository,
};
use link_qr::prelude::{EmbedService, QrService};
use link_qr::server;
use link_qr::utils::short_link_url::parse_short_link_key;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-qr.
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
    /// Manage workspaces (plan and branding)
    Workspace {
        #[command(subcommand)]
        action: WorkspaceAction,
    },

    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Manage partner embed tokens
    Embed {
        #[command(subcommand)]
        action: EmbedAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum WorkspaceAction {
    /// List all workspaces
    List,

    /// Create a workspace
    Create {
        /// Workspace name
        #[arg(short, long)]
        name: Option<String>,

        /// Plan (free, pro, business, advanced, enterprise)
        #[arg(short, long, default_value = "free")]
        plan: String,

        /// Branding logo URL
        #[arg(short, long)]
        logo: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Change a workspace's plan
    Plan {
        id: i64,
        plan: String,
    },

    /// Set or clear a workspace's branding logo
    Logo {
        id: i64,

        /// Logo URL
        url: Option<String>,

        /// Remove the logo
        #[arg(long, conflicts_with = "url")]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Register a short link
    Add {
        #[arg(long)]
        domain: String,

        #[arg(long)]
        key: String,

        /// Destination URL
        #[arg(long)]
        url: String,

        /// Owning workspace ID
        #[arg(long)]
        workspace: Option<i64>,
    },

    /// Show how a URL would be branded in a QR code
    Inspect {
        url: String,

        /// Caller logo, as passed in the `logo` query parameter
        #[arg(long)]
        logo: Option<String>,

        /// As passed in the `hideLogo` query parameter
        #[arg(long)]
        hide_logo: bool,
    },
}

#[derive(Subcommand)]
enum EmbedAction {
    /// Issue a widget token for a partner link
    Token {
        link_id: i64,

        /// Token lifetime in days
        #[arg(long, default_value_t = 30)]
        ttl_days: i64,
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

    let config = config::load_from_env()?;
    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::Workspace { action } => handle_workspace_action(action, &pool, &config).await?,
        Commands::Link { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Embed { action } => handle_embed_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches workspace commands.
async fn handle_workspace_action(
    action: WorkspaceAction,
    pool: &PgPool,
    config: &Config,
) -> Result<()> {
    let repo = PgWorkspaceRepository::new(Arc::new(pool.clone()));

    match action {
        WorkspaceAction::List => list_workspaces(&repo).await?,
        WorkspaceAction::Create {
            name,
            plan,
            logo,
            yes,
        } => create_workspace(&repo, name, plan, logo, yes).await?,
        WorkspaceAction::Plan { id, plan } => {
            let plan = parse_plan(&plan);
            let update = UpdateWorkspace {
                plan: Some(plan),
                ..Default::default()
            };
            update_workspace(&repo, config, id, update).await?;
        }
        WorkspaceAction::Logo { id, url, clear } => {
            if url.is_none() && !clear {
                anyhow::bail!("Provide a logo URL or --clear");
            }
            let update = UpdateWorkspace {
                logo: Some(url),
                ..Default::default()
            };
            update_workspace(&repo, config, id, update).await?;
        }
    }

    Ok(())
}

/// Lists all workspaces.
///
/// # Output Format
///
/// ```text
/// Workspaces
///
///   ID  Name                      Plan         Logo
///   -------------------------------------------------------------------
///   1   Acme                      pro          https://cdn.example.com/acme.png
/// ```
async fn list_workspaces(repo: &PgWorkspaceRepository) -> Result<()> {
    println!("{}", "Workspaces".bright_blue().bold());
    println!();

    let workspaces = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list workspaces: {}", e))?;

    if workspaces.is_empty() {
        println!("{}", "  No workspaces found".yellow());
        return Ok(());
    }

    println!(
        "  {:<3} {:<25} {:<12} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Plan".bright_white().bold(),
        "Logo".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for workspace in &workspaces {
        let plan = if workspace.plan.is_free() {
            workspace.plan.to_string().yellow()
        } else {
            workspace.plan.to_string().green()
        };

        println!(
            "  {:<3} {:<25} {:<12} {}",
            workspace.id.to_string().bright_black(),
            workspace.name.cyan(),
            plan,
            workspace.logo.as_deref().unwrap_or("-").bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        workspaces.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn create_workspace(
    repo: &PgWorkspaceRepository,
    name: Option<String>,
    plan: String,
    logo: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create Workspace".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Workspace name").interact_text()?,
    };
    let plan = parse_plan(&plan);

    println!("  Name: {}", name.cyan());
    println!("  Plan: {}", plan.to_string().cyan());
    println!("  Logo: {}", logo.as_deref().unwrap_or("-").cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this workspace?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let workspace = repo
        .create(NewWorkspace { name, plan, logo })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create workspace: {}", e))?;

    println!(
        "{} {}",
        "Workspace created with ID".green().bold(),
        workspace.id.to_string().bright_white().bold()
    );

    Ok(())
}

/// Applies a workspace update and drops its cache entry.
async fn update_workspace(
    repo: &PgWorkspaceRepository,
    config: &Config,
    id: i64,
    update: UpdateWorkspace,
) -> Result<()> {
    let workspace = repo
        .update(id, update)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update workspace: {}", e))?;

    invalidate(config, &workspace_key(id)).await;

    println!("{}", "Workspace updated".green().bold());
    println!("  Name: {}", workspace.name.cyan());
    println!("  Plan: {}", workspace.plan.to_string().cyan());
    println!(
        "  Logo: {}",
        workspace.logo.as_deref().unwrap_or("-").cyan()
    );

    Ok(())
}

fn parse_plan(value: &str) -> Plan {
    let plan = Plan::from(value.trim().to_ascii_lowercase());
    if let Plan::Other(name) = &plan {
        println!(
            "{}",
            format!("Unknown plan '{}', stored as-is and treated as paid", name).yellow()
        );
    }
    plan
}

/// Dispatches short link commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool.clone());

    match action {
        LinkAction::Add {
            domain,
            key,
            url,
            workspace,
        } => {
            let repo = PgShortLinkRepository::new(pool);
            let link = repo
                .create(NewShortLink {
                    domain: domain.to_ascii_lowercase(),
                    key,
                    url,
                    workspace_id: workspace,
                })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            invalidate(config, &link_key(&link.domain, &link.key)).await;

            println!("{}", "Link created".green().bold());
            println!("  ID:        {}", link.id.to_string().bright_black());
            println!("  Short URL: {}", link.short_url().bright_yellow());
            println!("  Target:    {}", link.url.cyan());
        }
        LinkAction::Inspect {
            url,
            logo,
            hide_logo,
        } => {
            let cache = server::connect_cache(config).await;
            let state = server::build_state(pool, cache, config.qr_default_logo.clone());
            inspect_link(&state.qr_service, &url, logo.as_deref(), hide_logo).await?;
        }
    }

    Ok(())
}

/// Prints the lookup result and branding decision for a URL.
async fn inspect_link(
    service: &QrService,
    url: &str,
    caller_logo: Option<&str>,
    hide_logo: bool,
) -> Result<()> {
    println!("{}", "Branding Inspection".bright_blue().bold());
    println!();

    match parse_short_link_key(url) {
        Some(lookup) => println!(
            "  Lookup:    {} / {}",
            lookup.domain.cyan(),
            lookup.key.cyan()
        ),
        None => println!("  Lookup:    {}", "not a short link URL".yellow()),
    }

    let link = service
        .find_short_link(url)
        .await
        .map_err(|e| anyhow::anyhow!("Link lookup failed: {}", e))?;

    let workspace = match link.as_ref().and_then(|l| l.workspace_id) {
        Some(id) => service
            .find_workspace(id)
            .await
            .map_err(|e| anyhow::anyhow!("Workspace lookup failed: {}", e))?,
        None => None,
    };

    let ownership = LinkOwnership::from_lookup(link.as_ref(), workspace.as_ref());
    match ownership {
        LinkOwnership::External => println!("  Link:      {}", "unknown".yellow()),
        LinkOwnership::Unowned => println!("  Link:      {}", "no workspace".yellow()),
        LinkOwnership::Workspace(ws) => println!(
            "  Link:      workspace {} ({}, plan {})",
            ws.id.to_string().bright_white(),
            ws.name.cyan(),
            ws.plan.to_string().cyan()
        ),
    }

    let effective = resolve_logo(ownership, caller_logo, hide_logo);
    let description = match effective {
        EffectiveLogo::PlatformDefault => "platform default".normal(),
        EffectiveLogo::Workspace(_) => "workspace logo".green(),
        EffectiveLogo::Caller(_) => "caller logo".green(),
        EffectiveLogo::NoLogo => "no logo".bright_black(),
    };

    println!("  Branding:  {}", description);
    println!(
        "  Logo src:  {}",
        effective
            .src(service.platform_logo())
            .unwrap_or("-")
            .bright_yellow()
    );
    println!();

    Ok(())
}

/// Dispatches embed token commands.
async fn handle_embed_action(action: EmbedAction, pool: &PgPool) -> Result<()> {
    match action {
        EmbedAction::Token { link_id, ttl_days } => {
            println!("{}", "Issue Embed Token".bright_blue().bold());
            println!();

            let service =
                EmbedService::new(Arc::new(PgEmbedRepository::new(Arc::new(pool.clone()))));
            let (token, stored) = service
                .issue_token(link_id, chrono::Duration::days(ttl_days))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

            println!("  Link:    {}", link_id.to_string().bright_black());
            println!("  Token:   {}", token.bright_yellow().bold());
            println!(
                "  Expires: {}",
                stored.expires_at.format("%Y-%m-%d %H:%M UTC").to_string().cyan()
            );
            println!();
            println!(
                "{}",
                "Save this token now, it cannot be shown again.".red().bold()
            );
            println!();
            println!("{}", "Widget URL:".bright_white());
            println!("  /embed/widget?token={}", token.bright_yellow());
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .context("Database check failed")?;

            println!("{}", "Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Drops a cache entry. Failures only warn: entries expire on their own.
async fn invalidate(config: &Config, key: &str) {
    if !config.is_cache_enabled() {
        return;
    }

    let cache = server::connect_cache(config).await;
    if let Err(e) = cache.invalidate(key).await {
        println!(
            "{}",
            format!("Failed to invalidate cache entry {}: {}", key, e).yellow()
        );
    }
}
