//! # Backup Format
//!
//! The full-state JSON document produced by `backup export`:
//!
//! ```json
//! { "products": [ ... ], "soldProducts": [ ... ] }
//! ```
//!
//! On import each collection is replaced only when its key is present, so a
//! file holding just `products` leaves the sale ledger as it was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::ledger::SaleLedger;
use crate::store::ProductStore;
use crate::types::{Product, ProductRecord, SoldProduct};

/// Backup document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<Vec<ProductRecord>>")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_products: Option<Vec<SoldProduct>>,
}

impl Backup {
    /// Captures both collections.
    pub fn capture(store: &ProductStore, ledger: &SaleLedger) -> Self {
        Backup {
            products: Some(store.products().to_vec()),
            sold_products: Some(ledger.sales().to_vec()),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Parses a backup document. Nothing is applied here, so a malformed
    /// file can never leave state half-replaced.
    pub fn parse(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::InvalidBackup(e.to_string()))
    }

    /// Replaces each collection present in the document.
    ///
    /// Returns `(products_replaced, sales_replaced)`.
    pub fn apply(self, store: &mut ProductStore, ledger: &mut SaleLedger) -> (bool, bool) {
        let products_replaced = match self.products {
            Some(products) => {
                *store = ProductStore::from_products(products);
                true
            }
            None => false,
        };
        let sales_replaced = match self.sold_products {
            Some(sales) => {
                *ledger = SaleLedger::from_sales(sales);
                true
            }
            None => false,
        };
        (products_replaced, sales_replaced)
    }

    /// Default export file name, e.g. `PEX_Backup_2026-10-16.json`.
    pub fn file_name(today: NaiveDate) -> String {
        format!("PEX_Backup_{}.json", today.format("%Y-%m-%d"))
    }
}
