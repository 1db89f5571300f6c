//! CLI administration tool for storefront-api.
//!
//! Provides commands for bootstrapping administrator accounts, managing
//! sessions and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an administrator (interactive)
//! cargo run --bin admin -- account create
//!
//! # Delete every expired admin and customer session
//! cargo run --bin admin -- sessions purge
//!
//! # Sign an account out everywhere
//! cargo run --bin admin -- sessions revoke jane@example.com --customer
//!
//! # Account and session counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same configuration as the server (`DATABASE_URL` or `DB_*`,
//! `SESSION_LIFETIME_SECONDS`, `DB_QUERY_TIMEOUT_SECONDS`, ...).

use storefront_api::application::services::SessionAuthenticator;
use storefront_api::config::{self, Config};
use storefront_api::domain::entities::{Account, Admin, AdminRole, Customer, NewAdmin};
use storefront_api::domain::repositories::PrincipalRepository;
use storefront_api::infrastructure::persistence::{
    PgAdminRepository, PgCustomerRepository, PgSessionRepository, SessionNamespace,
};
use storefront_api::server::connect_pool;
use storefront_api::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password, Select};
use sqlx::PgPool;
use std::sync::Arc;
use validator::ValidateEmail;

/// CLI tool for managing storefront-api.
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
    /// Manage administrator accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Manage sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show account and session counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an administrator
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        /// super_admin, admin or cashier
        #[arg(short, long)]
        role: Option<AdminRole>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Delete sessions past their absolute lifetime in both namespaces
    Purge,

    /// Delete every session of one account
    Revoke {
        email: String,

        /// Look the email up among customers instead of administrators
        #[arg(long)]
        customer: bool,

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
        Commands::Account { action } => handle_account_action(action, &pool, &config).await?,
        Commands::Sessions { action } => handle_session_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_account_action(action: AccountAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = PgAdminRepository::new(Arc::new(pool.clone()), config.query_timeout());

    match action {
        AccountAction::Create {
            email,
            name,
            role,
            yes,
        } => create_admin(&repo, email, name, role, yes).await,
    }
}

/// Creates an administrator with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email, name and role (unless provided)
/// 2. Prompt for the password twice
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Store the bcrypt hash
async fn create_admin(
    repo: &PgAdminRepository,
    email: Option<String>,
    name: Option<String>,
    role: Option<AdminRole>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Administrator".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email")
            .validate_with(|input: &String| -> Result<(), &'static str> {
                if input.validate_email() {
                    Ok(())
                } else {
                    Err("Not a valid email address")
                }
            })
            .interact_text()?,
    };

    if !email.validate_email() {
        anyhow::bail!("'{email}' is not a valid email address");
    }

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let role = match role {
        Some(r) => r,
        None => {
            let roles = [AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::Cashier];
            let labels: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
            let selected = Select::new()
                .with_prompt("Role")
                .items(&labels)
                .default(1)
                .interact()?;
            roles[selected]
        }
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.chars().count() >= 8 {
                Ok(())
            } else {
                Err("Password must be at least 8 characters")
            }
        })
        .interact()?;

    println!();
    println!("{}", "Administrator details:".bright_white().bold());
    println!("  Email: {}", email.cyan());
    println!("  Name:  {}", name.cyan());
    println!("  Role:  {}", role.as_str().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this administrator?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = hash_password(&password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let admin = repo
        .create(NewAdmin {
            email,
            password_hash,
            name,
            role,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create administrator: {}", e))?;

    println!();
    println!("{}", "✅ Administrator created successfully!".green().bold());
    println!("  ID: {}", admin.id.to_string().bright_black());
    println!();

    Ok(())
}

async fn handle_session_action(action: SessionAction, pool: &PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let query_timeout = config.query_timeout();

    let admins = Arc::new(PgAdminRepository::new(pool.clone(), query_timeout));
    let customers = Arc::new(PgCustomerRepository::new(pool.clone(), query_timeout));

    let admin_auth = SessionAuthenticator::<Admin>::new(
        admins.clone(),
        Arc::new(PgSessionRepository::new(
            pool.clone(),
            SessionNamespace::Admin,
            query_timeout,
        )),
    );
    let customer_auth = SessionAuthenticator::<Customer>::new(
        customers.clone(),
        Arc::new(PgSessionRepository::new(
            pool,
            SessionNamespace::Customer,
            query_timeout,
        )),
    );

    match action {
        SessionAction::Purge => {
            println!("{}", "🧹 Purging expired sessions".bright_blue().bold());
            println!();

            let lifetime = config.session_settings().lifetime;

            let admin_count = admin_auth
                .purge_expired(lifetime)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge admin sessions: {}", e))?;
            let customer_count = customer_auth
                .purge_expired(lifetime)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge customer sessions: {}", e))?;

            println!(
                "  Admin sessions removed:    {}",
                admin_count.to_string().bright_green().bold()
            );
            println!(
                "  Customer sessions removed: {}",
                customer_count.to_string().bright_green().bold()
            );
            println!();
        }
        SessionAction::Revoke {
            email,
            customer,
            yes,
        } => {
            if customer {
                revoke_sessions(&customer_auth, customers.as_ref(), &email, yes).await?;
            } else {
                revoke_sessions(&admin_auth, admins.as_ref(), &email, yes).await?;
            }
        }
    }

    Ok(())
}

/// Signs one account out of every session, with confirmation prompt.
async fn revoke_sessions<P: Account>(
    auth: &SessionAuthenticator<P>,
    accounts: &dyn PrincipalRepository<P>,
    email: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔒 Revoke Sessions".bright_blue().bold());
    println!();

    let account = accounts
        .find_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Account not found")?;

    println!("  Account: {}", account.email().cyan());
    println!("  ID:      {}", account.id().to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Revoke all sessions of this account?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = auth
        .revoke_all(account.id())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke sessions: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Sessions revoked:".green().bold(),
        removed.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays account and session counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins WHERE deleted_at IS NULL")
        .fetch_one(pool)
        .await?;

    let customers: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;

    let admin_sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_sessions")
        .fetch_one(pool)
        .await?;

    let customer_sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer_sessions")
        .fetch_one(pool)
        .await?;

    println!(
        "  Administrators:    {}",
        admins.to_string().bright_green().bold()
    );
    println!(
        "  Customers:         {}",
        customers.to_string().bright_green().bold()
    );
    println!(
        "  Admin sessions:    {}",
        admin_sessions.to_string().bright_green().bold()
    );
    println!(
        "  Customer sessions: {}",
        customer_sessions.to_string().bright_green().bold()
    );
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
