//! # Pandesal POS Command Line
//!
//! The till as a command-line program. One invocation runs one command
//! against the local store.
//!
//! ## Module Organization
//! ```text
//! pandesal_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── pos.toml + environment
//! ├── error.rs        ◄─── API error type for commands
//! └── commands/
//!     ├── product.rs  ◄─── Catalog management
//!     ├── sale.rs     ◄─── Checkout and history
//!     └── data.rs     ◄─── Export, backup, restore, info
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ExportKind, ProductCommand, SalesCommand};
use commands::{data, product, sale};
use config::PosConfig;
use error::ApiError;
use pandesal_db::{seed_default_products, Database, DbConfig, SeedOutcome};

/// Runs one command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  2. Load Config ──────────────────────────────────────────────────────► │
/// │     • pos.toml, then PANDESAL_* environment, then flags                 │
/// │                                                                         │
/// │  3. Open Store ───────────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │     • Empty catalog seeded with the default products                    │
/// │                                                                         │
/// │  4. Dispatch ─────────────────────────────────────────────────────────► │
/// │     • Text on stdout, or JSON with --json                               │
/// │     • Errors on stderr, exit status 1                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = PosConfig::load(cli.global.config.clone())?;
    cli.global.apply_to(&mut config);
    config.validate()?;

    let db_path = config.database_path()?;
    info!(?db_path, "Opening store");
    let db = Database::new(DbConfig::new(db_path)).await?;

    // A failed seed leaves an empty catalog, which the till still handles.
    match seed_default_products(&db).await {
        Ok(SeedOutcome::Seeded(count)) => info!(count = count, "Seeded default products"),
        Ok(SeedOutcome::AlreadyPopulated(_)) => {}
        Err(e) => warn!(error = %e, "Error seeding default products"),
    }

    let json = cli.global.json;
    let exit = match dispatch(&db, &config, cli.command, json).await {
        Ok(exit) => exit,
        Err(err) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                eprintln!("error {}", err);
            }
            ExitCode::FAILURE
        }
    };

    db.close().await;
    Ok(exit)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pandesal=trace` - Show trace for pandesal crates only
/// - Default: INFO, debug for pandesal crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pandesal=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Dispatch
// =============================================================================

async fn dispatch(
    db: &Database,
    config: &PosConfig,
    command: Command,
    json: bool,
) -> Result<ExitCode, ApiError> {
    match command {
        Command::Info => {
            let info = data::info(db).await?;
            emit(json, &info, || data::format_storage_info(&info))?;
        }

        Command::Products { action } => run_product_command(db, action, json).await?,

        Command::Sales { action } => match action {
            SalesCommand::List { latest } => {
                let sales = sale::list_sales(db, latest).await?;
                emit(json, &sales, || sale::format_sales(&sales))?;
            }
            SalesCommand::Show { id } => {
                let detail = sale::show_sale(db, id).await?;
                emit(json, &detail, || sale::format_sale_detail(&detail))?;
            }
        },

        Command::Checkout { cash, items } => {
            let detail = sale::checkout(db, &items, cash, Utc::now()).await?;
            emit(json, &detail, || sale::format_sale_detail(&detail))?;
        }

        Command::Export { what } => {
            let export_dir = config.export_dir();
            let summary = match what {
                ExportKind::Sales => data::export_sales(db, &export_dir, config.display_zone()).await?,
                ExportKind::Products => data::export_products(db, &export_dir).await?,
            };
            emit(json, &summary, || format!("Exported to {}\n", summary.path.display()))?;
        }

        Command::Backup { prefix } => {
            let prefix = prefix.as_deref().unwrap_or_else(|| config.backup_prefix());
            if prefix.trim().is_empty() || prefix.contains(['/', '\\']) {
                return Err(ApiError::validation(
                    "Backup prefix must be a non-empty file name fragment",
                ));
            }
            let summary = data::backup(db, &config.export_dir(), prefix).await?;
            emit(json, &summary, || {
                format!(
                    "Backup saved to {} ({} products, {} sales)\n",
                    summary.path.display(),
                    summary.stats.total_products,
                    summary.stats.total_sales
                )
            })?;
        }

        Command::Restore { file } => {
            let outcome = data::restore(db, &file).await;
            emit(json, &outcome, || format!("{}\n", outcome.message))?;
            if !outcome.success {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_product_command(
    db: &Database,
    action: ProductCommand,
    json: bool,
) -> Result<(), ApiError> {
    match action {
        ProductCommand::List { active } => {
            let products = product::list_products(db, active).await?;
            emit(json, &products, || product::format_products(&products))
        }
        ProductCommand::Add {
            name,
            price,
            image,
            inactive,
        } => {
            let added = product::add_product(db, &name, price, image, !inactive).await?;
            emit(json, &added, || product::format_products(std::slice::from_ref(&added)))
        }
        ProductCommand::Update {
            id,
            name,
            price,
            image,
        } => {
            let changes = product::ProductChanges { name, price, image };
            let updated = product::update_product(db, id, changes).await?;
            emit(json, &updated, || product::format_products(std::slice::from_ref(&updated)))
        }
        ProductCommand::Activate { id } => {
            product::set_product_active(db, id, true).await?;
            emit(json, &id, || format!("Product {} activated\n", id))
        }
        ProductCommand::Deactivate { id } => {
            product::set_product_active(db, id, false).await?;
            emit(json, &id, || format!("Product {} deactivated\n", id))
        }
        ProductCommand::Delete { id } => {
            product::delete_product(db, id).await?;
            emit(json, &id, || format!("Product {} deleted\n", id))
        }
    }
}

/// Prints `value` as pretty JSON, or the text rendering.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), ApiError> {
    if json {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Could not render JSON: {}", e)))?;
        println!("{}", rendered);
    } else {
        print!("{}", text());
    }
    Ok(())
}
