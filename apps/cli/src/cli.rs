//! # Command-Line Definition
//!
//! ```text
//! pex [--db PATH] [--user U] [--password P] [--yes] <command>
//!   product  add | edit | delete | list | lookup | share | advice
//!   sale     record | list | clear
//!   report   inventory | catalog | sales
//!   backup   export | import
//!   stats
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pex_core::{CategoryFilter, InventoryFilter};

/// PEX - pharmacy expiry tracker.
#[derive(Parser, Debug)]
#[command(name = "pex", version, about = "Pharmacy expiry tracker")]
pub struct Cli {
    /// Database file (default: <data dir>/pex.db).
    #[arg(long, global = true, env = "PEX_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Store login user (prompted when missing).
    #[arg(long, global = true, env = "PEX_USER")]
    pub user: Option<String>,

    /// Store login password (prompted when missing).
    #[arg(long, global = true, env = "PEX_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Confirm destructive actions without asking.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register, edit, list and inspect products.
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Record and review sales.
    Sale {
        #[command(subcommand)]
        action: SaleAction,
    },

    /// Print or export reports.
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },

    /// Export or restore the full state.
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Expired / critical / safe counters.
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum ProductAction {
    /// Register a product (or a catalog entry with --catalog).
    Add(ProductArgs),

    /// Edit a product; omitted options keep their value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: ProductArgs,
    },

    /// Delete one or more products.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List the inventory view.
    List(FilterArgs),

    /// Find the name registered for a barcode.
    Lookup { barcode: String },

    /// Print a shareable summary of a product.
    Share { id: String },

    /// Ask for handling guidance on a product.
    Advice { id: String },
}

/// Product form fields.
#[derive(Args, Debug, Default, Clone)]
pub struct ProductArgs {
    /// Product name (filled from the barcode when omitted).
    #[arg(long)]
    pub name: Option<String>,

    /// EAN/barcode.
    #[arg(long)]
    pub barcode: Option<String>,

    /// Lot identifier.
    #[arg(long)]
    pub batch: Option<String>,

    /// Units on hand.
    #[arg(long)]
    pub quantity: Option<i64>,

    /// Expiry date (YYYY-MM-DD).
    #[arg(long)]
    pub expiry: Option<String>,

    /// Shelf section.
    #[arg(long)]
    pub section: Option<String>,

    /// Transfer destination/origin.
    #[arg(long)]
    pub transfer: Option<String>,

    /// Free-text notes.
    #[arg(long)]
    pub observations: Option<String>,

    /// Registration number of the employee.
    #[arg(long)]
    pub registered_by: Option<String>,

    /// Catalog entry: barcode and name only, no expiry.
    #[arg(long)]
    pub catalog: bool,
}

/// Inventory view filters.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Matches name, barcode or batch.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// active | catalog | expired | critical | safe
    #[arg(long, short = 'c', default_value = "active")]
    pub category: CategoryFilter,

    /// Earliest expiry date (YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest expiry date (YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Shelf section substring.
    #[arg(long)]
    pub section: Option<String>,

    /// Transfer substring.
    #[arg(long)]
    pub transfer: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> InventoryFilter {
        InventoryFilter {
            search: self.search.clone().unwrap_or_default(),
            category: self.category,
            start_date: self.from,
            end_date: self.to,
            section: self.section.clone().unwrap_or_default(),
            transfer: self.transfer.clone().unwrap_or_default(),
            seller: String::new(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SaleAction {
    /// Record a sale against a product.
    Record {
        product_id: String,

        /// Seller registration number.
        #[arg(long)]
        seller: String,

        /// Units sold.
        #[arg(long, default_value_t = 1)]
        quantity: i64,
    },

    /// List sales, newest first.
    List {
        /// Seller registration substring.
        #[arg(long)]
        seller: Option<String>,
    },

    /// Erase the whole sales history.
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ReportKind {
    /// Expiry report over the filtered inventory.
    Inventory {
        #[command(flatten)]
        filter: FilterArgs,

        /// Write CSV to this file instead of printing.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Barcode/name listing of every product.
    Catalog {
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Sales history.
    Sales {
        /// Seller registration substring.
        #[arg(long)]
        seller: Option<String>,

        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupAction {
    /// Write the full state to a JSON file.
    Export {
        /// Target file (default: PEX_Backup_<date>.json).
        file: Option<PathBuf>,
    },

    /// Restore state from a JSON backup.
    Import { file: PathBuf },
}
