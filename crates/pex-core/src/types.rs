//! # Domain Types
//!
//! Core domain types used throughout PEX.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌─────────────────────┐             │
//! │  │      Product         │          │    SoldProduct      │             │
//! │  │  ──────────────────  │          │  ─────────────────  │             │
//! │  │  id (UUID)           │◄─────────│  product_id         │             │
//! │  │  barcode, batch      │ snapshot │  product_name       │             │
//! │  │  name (UPPERCASE)    │─────────►│  batch              │             │
//! │  │  quantity            │          │  quantity           │             │
//! │  │  kind ─┐             │          │  seller_id          │             │
//! │  └────────┼─────────────┘          │  sale_date          │             │
//! │           ▼                        └─────────────────────┘             │
//! │  ┌──────────────────────────────────────────┐                          │
//! │  │ EntryKind                                │                          │
//! │  │  Catalog            (barcode/name lookup) │                          │
//! │  │  Stocked(ExpiryInfo { date, days, status})│                          │
//! │  └──────────────────────────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The JSON written to storage and backups is the flat camelCase record the
//! browser version of PEX used, where a catalog entry is marked by the
//! sentinel expiry date `9999-12-31`. [`Product`] converts to and from
//! [`ProductRecord`] at the serde boundary, so the sentinel never leaks into
//! the domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::{catalog_sentinel_date, CATALOG_DAYS_TO_EXPIRY, CATALOG_SENTINEL};

// =============================================================================
// Expiry Status
// =============================================================================

/// Urgency tier derived from the number of days left before expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStatus {
    /// Already past its expiry date.
    #[serde(alias = "Vencido")]
    Expired,
    /// Expires within the critical window (0 to 35 days, inclusive).
    #[serde(alias = "Crítico (<= 35 dias)")]
    Critical,
    /// More than 35 days left, or a catalog entry.
    #[serde(alias = "Seguro (> 35 dias)")]
    Safe,
}

impl ExpiryStatus {
    /// Upper-case label used on the wire and in reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "EXPIRED",
            ExpiryStatus::Critical => "CRITICAL",
            ExpiryStatus::Safe => "SAFE",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXPIRED" => Ok(ExpiryStatus::Expired),
            "CRITICAL" => Ok(ExpiryStatus::Critical),
            "SAFE" => Ok(ExpiryStatus::Safe),
            other => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown status '{other}'"),
            }),
        }
    }
}

// =============================================================================
// Entry Kind
// =============================================================================

/// Expiry data for a stocked entry.
///
/// `days_to_expiry` and `status` are only ever produced together, by
/// [`crate::expiry::expiry_info`] at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryInfo {
    pub date: NaiveDate,
    pub days_to_expiry: i64,
    pub status: ExpiryStatus,
}

/// Whether a product is a catalog reference or a stocked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Barcode/name reference with no real expiry. Always SAFE.
    Catalog,
    /// Stocked item with a real expiry date.
    Stocked(ExpiryInfo),
}

// =============================================================================
// Product
// =============================================================================

/// One inventory or catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    /// Unique identifier, immutable after creation.
    pub id: String,

    /// EAN/barcode, empty when unknown. Catalog dedup key.
    pub barcode: String,

    /// Lot identifier, empty when unknown.
    pub batch: String,

    /// Display name, always upper-case.
    pub name: String,

    /// Units on hand.
    pub quantity: i64,

    /// Catalog reference or stocked item.
    pub kind: EntryKind,

    /// Shelf section (e.g. "A-1").
    pub section: String,

    /// Transfer destination/origin (e.g. "FILIAL 02").
    pub transfer: String,

    /// Free-text notes.
    pub observations: String,

    /// Registration number of the employee who registered the entry.
    pub registered_by: String,
}

impl Product {
    /// True for catalog references.
    #[inline]
    pub fn is_catalog(&self) -> bool {
        matches!(self.kind, EntryKind::Catalog)
    }

    /// Expiry date; catalog entries report the sentinel date.
    ///
    /// Date-range filters compare against this, so catalog entries sort
    /// after every real date exactly as the sentinel string did.
    pub fn expiry_date(&self) -> NaiveDate {
        match self.kind {
            EntryKind::Catalog => catalog_sentinel_date(),
            EntryKind::Stocked(info) => info.date,
        }
    }

    /// Days left before expiry; catalog entries report 999999.
    pub fn days_to_expiry(&self) -> i64 {
        match self.kind {
            EntryKind::Catalog => CATALOG_DAYS_TO_EXPIRY,
            EntryKind::Stocked(info) => info.days_to_expiry,
        }
    }

    /// Urgency tier; catalog entries are always SAFE.
    pub fn status(&self) -> ExpiryStatus {
        match self.kind {
            EntryKind::Catalog => ExpiryStatus::Safe,
            EntryKind::Stocked(info) => info.status,
        }
    }
}

// =============================================================================
// Product Record (wire format)
// =============================================================================

/// Flat JSON shape of a product as stored in `pex_inventory` and backups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, rename = "Product")]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub batch: String,
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    /// ISO date, or `9999-12-31` for catalog entries.
    pub expiry_date: String,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub transfer: String,
    #[serde(default)]
    pub days_to_expiry: i64,
    pub status: ExpiryStatus,
    #[serde(default)]
    pub registered_by: String,
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        let days_to_expiry = p.days_to_expiry();
        let status = p.status();
        let expiry_date = match p.kind {
            EntryKind::Catalog => CATALOG_SENTINEL.to_string(),
            EntryKind::Stocked(info) => info.date.format("%Y-%m-%d").to_string(),
        };

        ProductRecord {
            id: p.id,
            barcode: p.barcode,
            batch: p.batch,
            name: p.name,
            quantity: p.quantity,
            expiry_date,
            observations: p.observations,
            section: p.section,
            transfer: p.transfer,
            days_to_expiry,
            status,
            registered_by: p.registered_by,
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    /// Reads a stored record back into the domain model.
    ///
    /// Stored `daysToExpiry`/`status` are kept as written; they were computed
    /// together at write time. Catalog records ignore them.
    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        let kind = if r.expiry_date == CATALOG_SENTINEL {
            EntryKind::Catalog
        } else {
            let date = crate::validation::parse_expiry_date(&r.expiry_date)?;
            EntryKind::Stocked(ExpiryInfo {
                date,
                days_to_expiry: r.days_to_expiry,
                status: r.status,
            })
        };

        Ok(Product {
            id: r.id,
            barcode: r.barcode,
            batch: r.batch,
            name: r.name,
            quantity: r.quantity,
            kind,
            section: r.section,
            transfer: r.transfer,
            observations: r.observations,
            registered_by: r.registered_by,
        })
    }
}

// =============================================================================
// Sold Product
// =============================================================================

/// An immutable sale event.
///
/// Uses the snapshot pattern: name and batch are frozen at sale time and do
/// not follow later edits of the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SoldProduct {
    pub id: String,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    pub seller_id: String,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    /// Batch at time of sale (frozen).
    #[serde(default)]
    pub batch: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
