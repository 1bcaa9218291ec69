//! # Command Line
//!
//! ```text
//! pandesal [--config F] [--db F] [--export-dir D] [--utc-offset M] [--json] <COMMAND>
//!
//!   info                                  store counts and revenue
//!   products list [--active]              catalog
//!   products add <NAME> <PRICE> [--image URL] [--inactive]
//!   products update <ID> [--name N] [--price P] [--image URL]
//!   products activate|deactivate <ID>
//!   products delete <ID>
//!   sales list [--latest N]               history
//!   sales show <ID>                       one sale with its items
//!   checkout --cash 20 --item 1:4 --item 3
//!   export sales|products                 CSV into the export dir
//!   backup [--prefix P]                   JSON into the export dir
//!   restore <FILE>                        replace everything from a backup
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::PosConfig;

#[derive(Debug, Parser)]
#[command(name = "pandesal", version, about = "Pandesal bakery point of sale")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags that override the config file and environment.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (default: pos.toml in the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory receiving exports and backups
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,

    /// Minutes east of UTC used for export dates (default: local time)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    /// Applies the flags on top of an already loaded config.
    pub fn apply_to(&self, config: &mut PosConfig) {
        if let Some(db) = &self.db {
            config.database.path = Some(db.clone());
        }
        if let Some(dir) = &self.export_dir {
            config.export.dir = Some(dir.clone());
        }
        if let Some(minutes) = self.utc_offset {
            config.export.utc_offset_minutes = Some(minutes);
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show how much the store holds
    Info,

    /// Manage the catalog
    Products {
        #[command(subcommand)]
        action: ProductCommand,
    },

    /// Browse sales history
    Sales {
        #[command(subcommand)]
        action: SalesCommand,
    },

    /// Record a sale
    Checkout {
        /// Cash handed over by the customer
        #[arg(long)]
        cash: f64,

        /// Cart line as PRODUCT_ID[:QUANTITY], repeatable
        #[arg(long = "item", required = true)]
        items: Vec<CartLine>,
    },

    /// Export a collection as CSV
    Export {
        #[arg(value_enum)]
        what: ExportKind,
    },

    /// Write a JSON backup of the whole store
    Backup {
        /// File name prefix (default from config)
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Replace the whole store with a backup file
    Restore { file: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products
    List {
        /// Only products shown at the POS
        #[arg(long)]
        active: bool,
    },

    /// Add a product
    Add {
        name: String,
        price: f64,
        #[arg(long)]
        image: Option<String>,
        /// Add hidden from the POS
        #[arg(long)]
        inactive: bool,
    },

    /// Change name, price or image
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        image: Option<String>,
    },

    /// Show a product at the POS
    Activate { id: i64 },

    /// Hide a product from the POS
    Deactivate { id: i64 },

    /// Permanently remove a product
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum SalesCommand {
    /// List sales
    List {
        /// Only the N most recent, newest first
        #[arg(long)]
        latest: Option<u32>,
    },

    /// Show one sale with its items
    Show { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Sales,
    Products,
}

/// One `--item` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
}

impl FromStr for CartLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, qty) = match s.split_once(':') {
            Some((id, qty)) => (id, qty),
            None => (s, "1"),
        };

        let product_id = id
            .trim()
            .parse()
            .map_err(|_| format!("invalid product id '{}'", id))?;
        let quantity = qty
            .trim()
            .parse()
            .map_err(|_| format!("invalid quantity '{}'", qty))?;

        Ok(CartLine {
            product_id,
            quantity,
        })
    }
}
