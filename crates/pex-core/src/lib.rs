//! # pex-core: Pure Business Logic for PEX
//!
//! This crate is the **heart** of the PEX validity tracker. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PEX Architecture                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pex CLI (apps/cli)                           │   │
//! │  │    product add ──► sale record ──► report ──► backup           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pex-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  expiry  │ │  store   │ │  ledger  │ │  filter  │          │   │
//! │  │   │ classify │ │  upsert  │ │  sales   │ │  views   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  backup  │ │  report  │ │  action  │ │   auth   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pex-db (Storage Layer)                       │   │
//! │  │              SQLite snapshot table, migrations                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SoldProduct, ExpiryStatus)
//! - [`expiry`] - Day counting and urgency classification
//! - [`store`] - Product store (upsert, catalog dedup, removal)
//! - [`ledger`] - Sale ledger (record sale, clear)
//! - [`filter`] - Inventory view filtering and sorting
//! - [`backup`] - Backup document format
//! - [`report`] - Report models and share text
//! - [`action`] - Descriptions of destructive actions awaiting confirmation
//! - [`auth`] - Login credential check
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pex_core::expiry::{classify, days_until};
//! use pex_core::ExpiryStatus;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
//!
//! let days = days_until(Some(expiry), today);
//! assert_eq!(days, 35);
//! assert_eq!(classify(days), ExpiryStatus::Critical);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod action;
pub mod auth;
pub mod backup;
pub mod error;
pub mod expiry;
pub mod filter;
pub mod ledger;
pub mod report;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use action::DestructiveAction;
pub use backup::Backup;
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{CategoryFilter, InventoryFilter};
pub use ledger::{SaleLedger, SaleReceipt};
pub use store::{InventoryStats, ProductDraft, ProductStore, UpsertOutcome};
pub use types::*;

use chrono::NaiveDate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Expiry date that marks a catalog entry in the wire format.
pub const CATALOG_SENTINEL: &str = "9999-12-31";

/// Day count reported for catalog entries.
pub const CATALOG_DAYS_TO_EXPIRY: i64 = 999_999;

/// Last day count (inclusive) that is still CRITICAL.
pub const CRITICAL_WINDOW_DAYS: i64 = 35;

/// Shortest code that triggers a barcode lookup (EAN-8).
pub const BARCODE_LOOKUP_MIN_LEN: usize = 8;

/// Maximum length of an employee registration number.
pub const REGISTRATION_MAX_LEN: usize = 5;

/// Storage key of the product collection.
pub const INVENTORY_KEY: &str = "pex_inventory";

/// Storage key of the sale ledger.
pub const SALES_KEY: &str = "pex_sales";

/// The sentinel as a date.
pub fn catalog_sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}
