//! # Sale Ledger
//!
//! Newest-first list of sale events.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_sale(store, product_id, seller_id, quantity, now)               │
//! │                                                                         │
//! │  1. seller_id blank?           → Required { seller_id }                 │
//! │  2. product missing?           → ProductNotFound                        │
//! │  3. quantity outside 1..=stock → InvalidSaleQuantity { max: stock }     │
//! │        (nothing mutated on any failure above)                           │
//! │                                                                         │
//! │  4. prepend SoldProduct (name + batch frozen)                           │
//! │  5. stock -= quantity                                                   │
//! │  6. stock <= 0 and not catalog → product removed from the store         │
//! │     └── reported back as SaleReceipt::product_removed                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::store::ProductStore;
use crate::types::SoldProduct;
use crate::validation::{validate_sale_quantity, validate_seller_id};

/// What a successful sale did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleReceipt {
    /// The recorded sale event.
    pub sale: SoldProduct,
    /// Stock left on the product after the sale.
    pub remaining: i64,
    /// True when the sale exhausted a stocked product and it was removed.
    pub product_removed: bool,
}

/// The sale history, newest first. Serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleLedger {
    sales: Vec<SoldProduct>,
}

impl SaleLedger {
    pub fn new() -> Self {
        SaleLedger::default()
    }

    /// Wraps a loaded snapshot (already newest first).
    pub fn from_sales(sales: Vec<SoldProduct>) -> Self {
        SaleLedger { sales }
    }

    /// All sales, newest first.
    pub fn sales(&self) -> &[SoldProduct] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Sales whose seller registration contains `seller`, matched as typed.
    /// An empty filter returns everything.
    pub fn by_seller(&self, seller: &str) -> Vec<&SoldProduct> {
        let needle = seller.trim();
        self.sales
            .iter()
            .filter(|s| needle.is_empty() || s.seller_id.contains(needle))
            .collect()
    }

    /// Records a sale against `store`.
    ///
    /// ## Arguments
    /// * `store` - Product store holding the sold item
    /// * `product_id` - Item being sold
    /// * `seller_id` - Registration of the seller (required)
    /// * `quantity` - Units sold, `1..=stock`
    /// * `now` - Sale timestamp
    ///
    /// ## Returns
    /// * `Ok(SaleReceipt)` - Sale recorded, stock updated
    /// * `Err(CoreError)` - Precondition failed; neither store nor ledger changed
    pub fn record_sale(
        &mut self,
        store: &mut ProductStore,
        product_id: &str,
        seller_id: &str,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<SaleReceipt> {
        validate_seller_id(seller_id)?;

        let product = store
            .get_mut(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        validate_sale_quantity(quantity, product.quantity)?;

        let sale = SoldProduct {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            seller_id: seller_id.trim().to_string(),
            sale_date: now,
            batch: product.batch.clone(),
        };

        product.quantity -= quantity;
        let remaining = product.quantity;
        let product_removed = remaining <= 0 && !product.is_catalog();

        if product_removed {
            store.remove(product_id);
        }
        self.sales.insert(0, sale.clone());

        Ok(SaleReceipt {
            sale,
            remaining,
            product_removed,
        })
    }

    /// Empties the ledger. Returns how many sales were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.sales.len();
        self.sales.clear();
        count
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::store::ProductDraft;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap()
    }

    fn add_stocked(store: &mut ProductStore, name: &str, batch: &str, qty: i64) -> String {
        let draft = ProductDraft {
            name: name.to_string(),
            batch: batch.to_string(),
            quantity: Some(qty),
            expiry_date: Some(today() + Duration::days(60)),
            ..ProductDraft::default()
        };
        store.upsert(draft, None, today()).unwrap().id().to_string()
    }

    #[test]
    fn test_dipirona_scenario() {
        let mut store = ProductStore::new();
        let mut ledger = SaleLedger::new();
        let id = add_stocked(&mut store, "dipirona", "L1", 5);

        let first = ledger
            .record_sale(&mut store, &id, "998877", 3, now())
            .unwrap();
        assert_eq!(first.remaining, 2);
        assert!(!first.product_removed);
        assert_eq!(store.get(&id).unwrap().quantity, 2);

        let second = ledger
            .record_sale(&mut store, &id, "998877", 2, now() + Duration::minutes(5))
            .unwrap();
        assert!(second.product_removed);
        assert!(store.get(&id).is_none());

        let quantities: Vec<i64> = ledger.sales().iter().map(|s| s.quantity).collect();
        assert_eq!(quantities, vec![2, 3], "newest sale first");
        assert!(ledger.sales().iter().all(|s| s.product_name == "DIPIRONA"));
        assert!(ledger.sales().iter().all(|s| s.batch == "L1"));
    }

    #[test]
    fn test_over_stock_sale_is_rejected_without_mutation() {
        let mut store = ProductStore::new();
        let mut ledger = SaleLedger::new();
        let id = add_stocked(&mut store, "amoxicilina", "", 5);
        let before = store.clone();

        let err = ledger
            .record_sale(&mut store, &id, "998877", 6, now())
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidSaleQuantity { requested: 6, max: 5 })
        ));
        assert_eq!(store, before);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_zero_quantity_sale_is_rejected() {
        let mut store = ProductStore::new();
        let mut ledger = SaleLedger::new();
        let id = add_stocked(&mut store, "a", "", 5);
        assert!(ledger.record_sale(&mut store, &id, "1", 0, now()).is_err());
    }

    #[test]
    fn test_missing_seller_is_reported_first() {
        let mut store = ProductStore::new();
        let mut ledger = SaleLedger::new();
        let id = add_stocked(&mut store, "a", "", 5);

        let err = ledger
            .record_sale(&mut store, &id, "   ", 99, now())
            .unwrap_err();
        match err {
            CoreError::Validation(v) => assert_eq!(v.field(), "seller_id"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.get(&id).unwrap().quantity, 5);
    }

    #[test]
    fn test_unknown_product() {
        let mut store = ProductStore::new();
        let mut ledger = SaleLedger::new();
        let err = ledger
            .record_sale(&mut store, "ghost", "1", 1, now())
            .unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_exhausted_catalog_entry_is_kept() {
        let mut store = ProductStore::new();
        let mut ledger = SaleLedger::new();

        let catalog = ProductDraft {
            name: "soro".to_string(),
            barcode: "7890000000000".to_string(),
            catalog: true,
            ..ProductDraft::default()
        };
        let id = store.upsert(catalog, None, today()).unwrap().id().to_string();

        // Catalog entries start at zero; give it stock through an edit.
        let mut draft = ProductDraft::from(store.get(&id).unwrap());
        draft.quantity = Some(2);
        store.upsert(draft, Some(&id), today()).unwrap();

        let receipt = ledger.record_sale(&mut store, &id, "1", 2, now()).unwrap();
        assert!(!receipt.product_removed);
        assert_eq!(receipt.remaining, 0);
        assert!(store.get(&id).is_some());
    }

    #[test]
    fn test_sale_snapshot_survives_rename() {
        let mut store = ProductStore::new();
        let mut ledger = SaleLedger::new();
        let id = add_stocked(&mut store, "old name", "", 5);
        ledger.record_sale(&mut store, &id, "1", 1, now()).unwrap();

        let mut draft = ProductDraft::from(store.get(&id).unwrap());
        draft.name = "new name".to_string();
        store.upsert(draft, Some(&id), today()).unwrap();

        assert_eq!(ledger.sales()[0].product_name, "OLD NAME");
    }

    #[test]
    fn test_by_seller_and_clear() {
        let mut store = ProductStore::new();
        let mut ledger = SaleLedger::new();
        let id = add_stocked(&mut store, "a", "", 10);
        ledger.record_sale(&mut store, &id, "12345", 1, now()).unwrap();
        ledger.record_sale(&mut store, &id, "67890", 1, now()).unwrap();

        ledger.record_sale(&mut store, &id, "RX-9", 1, now()).unwrap();

        assert_eq!(ledger.by_seller("234").len(), 1);
        assert_eq!(ledger.by_seller("RX").len(), 1);
        assert!(ledger.by_seller("rx").is_empty());
        assert_eq!(ledger.by_seller("").len(), 3);
        assert_eq!(ledger.clear(), 3);
        assert!(ledger.is_empty());
    }
}
