//! # Inventory State
//!
//! The product store and sale ledger of one `pex` invocation, plus the
//! persistence port they are mirrored to.
//!
//! ```text
//! load ──► refresh_expiry(today) ──► command mutates ──► save_* (full rewrite)
//! ```
//!
//! Every mutation is followed by a save of the collection it touched.

use std::sync::Arc;

use chrono::NaiveDate;
use pex_core::{ProductStore, SaleLedger};
use pex_db::{load_products, load_sales, save_products, save_sales, DbResult, SnapshotStore};
use tracing::info;

/// Loaded state plus its storage.
pub struct InventoryState {
    snapshots: Arc<dyn SnapshotStore>,
    products: ProductStore,
    ledger: SaleLedger,
}

impl InventoryState {
    /// Loads both collections. Missing keys load as empty.
    pub async fn load(snapshots: Arc<dyn SnapshotStore>) -> DbResult<Self> {
        let products = load_products(snapshots.as_ref()).await?;
        let ledger = load_sales(snapshots.as_ref()).await?;

        info!(
            products = products.len(),
            sales = ledger.len(),
            "Inventory loaded"
        );

        Ok(InventoryState {
            snapshots,
            products,
            ledger,
        })
    }

    /// Recomputes expiry fields for `today`; saves only when something moved.
    pub async fn refresh(&mut self, today: NaiveDate) -> DbResult<usize> {
        let changed = self.products.refresh_expiry(today);
        if changed > 0 {
            info!(changed, %today, "Expiry statuses refreshed");
            self.save_products().await?;
        }
        Ok(changed)
    }

    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut ProductStore {
        &mut self.products
    }

    pub fn ledger(&self) -> &SaleLedger {
        &self.ledger
    }

    /// Both collections at once, for operations that touch the two.
    pub fn split_mut(&mut self) -> (&mut ProductStore, &mut SaleLedger) {
        (&mut self.products, &mut self.ledger)
    }

    pub async fn save_products(&self) -> DbResult<()> {
        save_products(self.snapshots.as_ref(), &self.products).await
    }

    pub async fn save_sales(&self) -> DbResult<()> {
        save_sales(self.snapshots.as_ref(), &self.ledger).await
    }
}

impl std::fmt::Debug for InventoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryState")
            .field("products", &self.products.len())
            .field("sales", &self.ledger.len())
            .finish()
    }
}
