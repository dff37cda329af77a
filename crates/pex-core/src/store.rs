//! # Product Store
//!
//! The ordered collection of inventory and catalog entries.
//!
//! ## Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      upsert(draft, editing_id, today)                   │
//! │                                                                         │
//! │  draft.validate() ── fails? ──► ValidationError (store untouched)       │
//! │       │                                                                 │
//! │       ├── editing_id = Some(id) ──► overwrite record in place           │
//! │       │                             (id kept, derived fields fresh)     │
//! │       │                                                                 │
//! │       ├── catalog + barcode matches an existing catalog entry           │
//! │       │        └──► rename that entry, no new record                    │
//! │       │                                                                 │
//! │       └── otherwise ──► push new record with a fresh UUID               │
//! │                                                                         │
//! │  Every path stamps days_to_expiry + status from the expiry date.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::expiry::expiry_info;
use crate::types::{EntryKind, ExpiryStatus, Product};
use crate::validation::{
    normalize_registration, validate_product_name, validate_stock_quantity, ValidationResult,
};
use crate::{catalog_sentinel_date, BARCODE_LOOKUP_MIN_LEN};

// =============================================================================
// Product Draft
// =============================================================================

/// Form data for creating or editing a product.
///
/// When editing, start from [`ProductDraft::from`] the existing product and
/// overwrite what changed; the store treats the draft as the merged record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub barcode: String,
    pub batch: String,
    pub name: String,
    /// `None` keeps the current quantity on edit and means 0 on create.
    pub quantity: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
    /// Catalog ("fast") registration: barcode and name only.
    pub catalog: bool,
    pub section: String,
    pub transfer: String,
    pub observations: String,
    pub registered_by: String,
}

impl ProductDraft {
    /// Catalog mode is requested explicitly or by entering the sentinel date.
    pub fn is_catalog(&self) -> bool {
        self.catalog || self.expiry_date == Some(catalog_sentinel_date())
    }

    /// Checks required fields.
    ///
    /// ## Rules
    /// - Name is required
    /// - Expiry date is required unless registering a catalog entry
    /// - Quantity, when given, is not negative
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;

        if !self.is_catalog() && self.expiry_date.is_none() {
            return Err(ValidationError::Required {
                field: "expiry_date".to_string(),
            });
        }

        if let Some(qty) = self.quantity {
            validate_stock_quantity(qty)?;
        }

        Ok(())
    }

    /// Entry kind for this draft, with derived fields computed for `today`.
    fn entry_kind(&self, today: NaiveDate) -> ValidationResult<EntryKind> {
        if self.is_catalog() {
            return Ok(EntryKind::Catalog);
        }

        let date = self.expiry_date.ok_or_else(|| ValidationError::Required {
            field: "expiry_date".to_string(),
        })?;
        Ok(EntryKind::Stocked(expiry_info(date, today)))
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        ProductDraft {
            barcode: p.barcode.clone(),
            batch: p.batch.clone(),
            name: p.name.clone(),
            quantity: Some(p.quantity),
            expiry_date: match p.kind {
                EntryKind::Catalog => None,
                EntryKind::Stocked(info) => Some(info.date),
            },
            catalog: p.is_catalog(),
            section: p.section.clone(),
            transfer: p.transfer.clone(),
            observations: p.observations.clone(),
            registered_by: p.registered_by.clone(),
        }
    }
}

// =============================================================================
// Upsert Outcome
// =============================================================================

/// What an upsert did, and to which record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was appended.
    Created(String),
    /// An existing record was overwritten.
    Updated(String),
    /// A catalog registration matched an existing catalog barcode; only the
    /// name of that record changed.
    CatalogMerged(String),
}

impl UpsertOutcome {
    /// Id of the affected record.
    pub fn id(&self) -> &str {
        match self {
            UpsertOutcome::Created(id)
            | UpsertOutcome::Updated(id)
            | UpsertOutcome::CatalogMerged(id) => id,
        }
    }
}

// =============================================================================
// Inventory Stats
// =============================================================================

/// Dashboard counters over stocked (non-catalog) entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total: usize,
    pub expired: usize,
    pub critical: usize,
    pub safe: usize,
}

impl InventoryStats {
    /// Number of entries needing attention (expired + critical).
    pub fn alert_count(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.expired + self.critical
    }
}

// =============================================================================
// Product Store
// =============================================================================

/// Ordered collection of products, serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ProductStore::default()
    }

    /// Wraps a loaded snapshot.
    pub fn from_products(products: Vec<Product>) -> Self {
        ProductStore { products }
    }

    /// All records in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks a record up by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Creates, edits or catalog-merges a product.
    ///
    /// ## Arguments
    /// * `draft` - Form data (merged data when editing)
    /// * `editing_id` - Id of the record being edited, if any
    /// * `today` - Reference date for the derived expiry fields
    ///
    /// ## Returns
    /// * `Ok(UpsertOutcome)` - Which record was affected and how
    /// * `Err(CoreError::Validation)` - Draft rejected, store untouched
    /// * `Err(CoreError::ProductNotFound)` - `editing_id` does not exist
    pub fn upsert(
        &mut self,
        draft: ProductDraft,
        editing_id: Option<&str>,
        today: NaiveDate,
    ) -> CoreResult<UpsertOutcome> {
        draft.validate()?;
        let kind = draft.entry_kind(today)?;
        let catalog = matches!(kind, EntryKind::Catalog);

        let name = draft.name.trim().to_uppercase();
        let barcode = draft.barcode.trim().to_string();
        let registered_by = normalize_registration(&draft.registered_by);

        if let Some(id) = editing_id {
            let product = self
                .get_mut(id)
                .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

            product.barcode = barcode;
            product.batch = draft.batch.trim().to_uppercase();
            product.name = name;
            product.quantity = draft.quantity.unwrap_or(product.quantity);
            product.kind = kind;
            product.section = draft.section.trim().to_uppercase();
            product.transfer = draft.transfer.trim().to_uppercase();
            product.observations = draft.observations;
            product.registered_by = registered_by;

            return Ok(UpsertOutcome::Updated(id.to_string()));
        }

        if catalog && !barcode.is_empty() {
            if let Some(existing) = self
                .products
                .iter_mut()
                .find(|p| p.is_catalog() && p.barcode == barcode)
            {
                existing.name = name;
                return Ok(UpsertOutcome::CatalogMerged(existing.id.clone()));
            }
        }

        let id = generate_product_id();
        self.products.push(Product {
            id: id.clone(),
            barcode,
            batch: draft.batch.trim().to_uppercase(),
            name,
            quantity: if catalog { 0 } else { draft.quantity.unwrap_or(0) },
            kind,
            section: draft.section.trim().to_uppercase(),
            transfer: draft.transfer.trim().to_uppercase(),
            observations: draft.observations,
            registered_by,
        });

        Ok(UpsertOutcome::Created(id))
    }

    /// Deletes a single record. Returns it when it existed.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    /// Deletes every record whose id is in `ids`. Returns how many went.
    pub fn remove_many(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.products.len();
        self.products.retain(|p| !ids.contains(&p.id));
        before - self.products.len()
    }

    /// Finds the best match for a scanned barcode, for name autofill.
    ///
    /// Codes shorter than 8 characters never match. A catalog entry wins
    /// over a stocked entry with the same code.
    pub fn lookup_barcode(&self, code: &str) -> Option<&Product> {
        let code = code.trim();
        if code.len() < BARCODE_LOOKUP_MIN_LEN {
            return None;
        }

        let mut matches = self.products.iter().filter(|p| p.barcode == code);
        let catalog = matches.clone().find(|p| p.is_catalog());
        catalog.or_else(|| matches.find(|p| !p.is_catalog()))
    }

    /// Recomputes the derived expiry fields of every stocked entry.
    ///
    /// Returns how many records changed status or day count.
    pub fn refresh_expiry(&mut self, today: NaiveDate) -> usize {
        let mut changed = 0;
        for product in &mut self.products {
            if let EntryKind::Stocked(info) = product.kind {
                let fresh = expiry_info(info.date, today);
                if fresh != info {
                    product.kind = EntryKind::Stocked(fresh);
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Dashboard counters (catalog entries excluded).
    pub fn stats(&self) -> InventoryStats {
        self.products
            .iter()
            .filter(|p| !p.is_catalog())
            .fold(InventoryStats::default(), |mut stats, p| {
                stats.total += 1;
                match p.status() {
                    ExpiryStatus::Expired => stats.expired += 1,
                    ExpiryStatus::Critical => stats.critical += 1,
                    ExpiryStatus::Safe => stats.safe += 1,
                }
                stats
            })
    }
}

/// Generates a new product id (UUID v4).
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CATALOG_DAYS_TO_EXPIRY;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn stocked_draft(name: &str, days: i64, quantity: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            barcode: "7891000000001".to_string(),
            quantity: Some(quantity),
            expiry_date: Some(today() + Duration::days(days)),
            ..ProductDraft::default()
        }
    }

    fn catalog_draft(barcode: &str, name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            barcode: barcode.to_string(),
            catalog: true,
            quantity: Some(9),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_create_stamps_derived_fields_and_uppercases() {
        let mut store = ProductStore::new();
        let outcome = store
            .upsert(stocked_draft("dipirona 500mg", 10, 5), None, today())
            .unwrap();

        assert!(matches!(outcome, UpsertOutcome::Created(_)));
        let product = store.get(outcome.id()).unwrap();
        assert_eq!(product.name, "DIPIRONA 500MG");
        assert_eq!(product.days_to_expiry(), 10);
        assert_eq!(product.status(), ExpiryStatus::Critical);
        assert_eq!(product.quantity, 5);
    }

    #[test]
    fn test_unset_fields_default_to_empty_and_zero() {
        let mut store = ProductStore::new();
        let draft = ProductDraft {
            name: "soro".to_string(),
            expiry_date: Some(today()),
            ..ProductDraft::default()
        };
        let id = store.upsert(draft, None, today()).unwrap().id().to_string();
        let product = store.get(&id).unwrap();
        assert_eq!(product.quantity, 0);
        assert_eq!(product.batch, "");
        assert_eq!(product.section, "");
    }

    #[test]
    fn test_catalog_entries_are_safe_with_fixed_day_count() {
        let mut store = ProductStore::new();
        let id = store
            .upsert(catalog_draft("7891111111111", "paracetamol"), None, today())
            .unwrap()
            .id()
            .to_string();

        let product = store.get(&id).unwrap();
        assert!(product.is_catalog());
        assert_eq!(product.status(), ExpiryStatus::Safe);
        assert_eq!(product.days_to_expiry(), CATALOG_DAYS_TO_EXPIRY);
        assert_eq!(product.quantity, 0, "catalog quantity is forced to zero");
    }

    #[test]
    fn test_sentinel_date_selects_catalog_mode() {
        let draft = ProductDraft {
            name: "X".to_string(),
            expiry_date: Some(catalog_sentinel_date()),
            ..ProductDraft::default()
        };
        assert!(draft.is_catalog());
    }

    #[test]
    fn test_catalog_barcode_match_never_duplicates() {
        let mut store = ProductStore::new();
        let first = store
            .upsert(catalog_draft("7891111111111", "paracetamol"), None, today())
            .unwrap();
        let second = store
            .upsert(catalog_draft("7891111111111", "paracetamol 750mg"), None, today())
            .unwrap();

        assert_eq!(second, UpsertOutcome::CatalogMerged(first.id().to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.products()[0].name, "PARACETAMOL 750MG");
    }

    #[test]
    fn test_catalog_without_barcode_always_creates() {
        let mut store = ProductStore::new();
        store.upsert(catalog_draft("", "a"), None, today()).unwrap();
        store.upsert(catalog_draft("", "b"), None, today()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_stocked_entry_with_catalog_barcode_is_not_merged() {
        let mut store = ProductStore::new();
        store
            .upsert(catalog_draft("7891000000001", "dipirona"), None, today())
            .unwrap();
        store
            .upsert(stocked_draft("dipirona", 50, 3), None, today())
            .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_edit_recomputes_derived_fields() {
        let mut store = ProductStore::new();
        let id = store
            .upsert(stocked_draft("ibuprofeno", 100, 4), None, today())
            .unwrap()
            .id()
            .to_string();
        assert_eq!(store.get(&id).unwrap().status(), ExpiryStatus::Safe);

        let mut draft = ProductDraft::from(store.get(&id).unwrap());
        draft.expiry_date = Some(today() - Duration::days(3));
        let outcome = store.upsert(draft, Some(&id), today()).unwrap();

        assert_eq!(outcome, UpsertOutcome::Updated(id.clone()));
        let product = store.get(&id).unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.days_to_expiry(), -3);
        assert_eq!(product.status(), ExpiryStatus::Expired);
        assert_eq!(product.quantity, 4);
    }

    #[test]
    fn test_edit_unknown_id_fails() {
        let mut store = ProductStore::new();
        let err = store
            .upsert(stocked_draft("x", 1, 1), Some("missing"), today())
            .unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_validation_rejects_without_mutation() {
        let mut store = ProductStore::new();
        let no_name = ProductDraft {
            expiry_date: Some(today()),
            ..ProductDraft::default()
        };
        let no_expiry = ProductDraft {
            name: "x".to_string(),
            ..ProductDraft::default()
        };

        assert!(store.upsert(no_name, None, today()).is_err());
        let err = store.upsert(no_expiry, None, today()).unwrap_err();
        match err {
            CoreError::Validation(v) => assert_eq!(v.field(), "expiry_date"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_and_remove_many() {
        let mut store = ProductStore::new();
        let a = store.upsert(stocked_draft("a", 1, 1), None, today()).unwrap();
        let b = store.upsert(stocked_draft("b", 1, 1), None, today()).unwrap();
        let c = store.upsert(stocked_draft("c", 1, 1), None, today()).unwrap();

        assert!(store.remove(a.id()).is_some());
        assert!(store.remove(a.id()).is_none());

        let ids: HashSet<String> = [b.id().to_string(), "ghost".to_string()].into();
        assert_eq!(store.remove_many(&ids), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.products()[0].id, c.id());
    }

    #[test]
    fn test_lookup_prefers_catalog_entry() {
        let mut store = ProductStore::new();
        store
            .upsert(stocked_draft("inventory name", 20, 2), None, today())
            .unwrap();
        assert_eq!(
            store.lookup_barcode("7891000000001").unwrap().name,
            "INVENTORY NAME"
        );

        store
            .upsert(catalog_draft("7891000000001", "catalog name"), None, today())
            .unwrap();
        assert_eq!(
            store.lookup_barcode("7891000000001").unwrap().name,
            "CATALOG NAME"
        );
        assert!(store.lookup_barcode("7891").is_none());
    }

    #[test]
    fn test_refresh_expiry_moves_items_between_tiers() {
        let mut store = ProductStore::new();
        store
            .upsert(stocked_draft("a", 36, 1), None, today())
            .unwrap();
        store
            .upsert(catalog_draft("7890000000000", "cat"), None, today())
            .unwrap();

        assert_eq!(store.refresh_expiry(today()), 0);
        let changed = store.refresh_expiry(today() + Duration::days(1));
        assert_eq!(changed, 1);
        assert_eq!(store.products()[0].status(), ExpiryStatus::Critical);
        assert_eq!(store.products()[0].days_to_expiry(), 35);
    }

    #[test]
    fn test_stats_exclude_catalog() {
        let mut store = ProductStore::new();
        store.upsert(stocked_draft("a", -1, 1), None, today()).unwrap();
        store.upsert(stocked_draft("b", 3, 1), None, today()).unwrap();
        store.upsert(stocked_draft("c", 90, 1), None, today()).unwrap();
        store
            .upsert(catalog_draft("7890000000000", "cat"), None, today())
            .unwrap();

        let stats = store.stats();
        assert_eq!(
            stats,
            InventoryStats {
                total: 3,
                expired: 1,
                critical: 1,
                safe: 1
            }
        );
        assert_eq!(stats.alert_count(), 2);
        assert_eq!(InventoryStats::default().alert_count(), 0);
    }
}
