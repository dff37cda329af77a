//! # Persistence Port
//!
//! The domain never talks to SQLite directly. It loads and saves whole
//! collections through [`SnapshotStore`], which has two implementations:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   SnapshotStore (trait)      │
//! │   load(key) / save(key, doc) │
//! └──────────────┬───────────────┘
//!        ┌───────┴──────────┐
//!        ▼                  ▼
//! SqliteSnapshotStore   MemorySnapshotStore
//!   (snapshots table)     (HashMap, tests)
//! ```
//!
//! The typed helpers below map the two collections onto their keys
//! (`pex_inventory`, `pex_sales`). A missing key loads as an empty
//! collection.

use std::collections::HashMap;

use async_trait::async_trait;
use pex_core::{ProductStore, SaleLedger, INVENTORY_KEY, SALES_KEY};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::snapshot::SnapshotRepository;

/// Key/value document storage.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the document under `key`.
    async fn load(&self, key: &str) -> DbResult<Option<String>>;

    /// Replaces the document under `key`.
    async fn save(&self, key: &str, value: &str) -> DbResult<()>;
}

// =============================================================================
// SQLite
// =============================================================================

/// [`SnapshotStore`] backed by the `snapshots` table.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotStore {
    repo: SnapshotRepository,
}

impl SqliteSnapshotStore {
    pub fn new(db: &Database) -> Self {
        SqliteSnapshotStore {
            repo: db.snapshots(),
        }
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self, key: &str) -> DbResult<Option<String>> {
        self.repo.get(key).await
    }

    async fn save(&self, key: &str, value: &str) -> DbResult<()> {
        self.repo.put(key, value).await
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// [`SnapshotStore`] kept in a map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    docs: RwLock<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        MemorySnapshotStore::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> DbResult<()> {
        self.docs
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Typed collections
// =============================================================================

async fn load_json<T>(store: &dyn SnapshotStore, key: &str) -> DbResult<Option<T>>
where
    T: DeserializeOwned,
{
    match store.load(key).await? {
        Some(doc) => serde_json::from_str(&doc)
            .map(Some)
            .map_err(|e| DbError::serialization(key, e)),
        None => Ok(None),
    }
}

async fn save_json<T>(store: &dyn SnapshotStore, key: &str, value: &T) -> DbResult<()>
where
    T: Serialize + Sync,
{
    let doc = serde_json::to_string(value).map_err(|e| DbError::serialization(key, e))?;
    store.save(key, &doc).await
}

/// Loads the product collection (`pex_inventory`).
pub async fn load_products(store: &dyn SnapshotStore) -> DbResult<ProductStore> {
    let products: ProductStore = load_json(store, INVENTORY_KEY).await?.unwrap_or_default();
    debug!(count = products.len(), "Loaded products");
    Ok(products)
}

/// Rewrites the product collection in full.
pub async fn save_products(store: &dyn SnapshotStore, products: &ProductStore) -> DbResult<()> {
    debug!(count = products.len(), "Saving products");
    save_json(store, INVENTORY_KEY, products).await
}

/// Loads the sale ledger (`pex_sales`).
pub async fn load_sales(store: &dyn SnapshotStore) -> DbResult<SaleLedger> {
    let ledger: SaleLedger = load_json(store, SALES_KEY).await?.unwrap_or_default();
    debug!(count = ledger.len(), "Loaded sales");
    Ok(ledger)
}

/// Rewrites the sale ledger in full.
pub async fn save_sales(store: &dyn SnapshotStore, ledger: &SaleLedger) -> DbResult<()> {
    debug!(count = ledger.len(), "Saving sales");
    save_json(store, SALES_KEY, ledger).await
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pex_core::ProductDraft;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn sample() -> (ProductStore, SaleLedger) {
        let mut products = ProductStore::new();
        let mut ledger = SaleLedger::new();
        let id = products
            .upsert(
                ProductDraft {
                    name: "omeprazol".to_string(),
                    quantity: Some(3),
                    expiry_date: Some(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()),
                    ..ProductDraft::default()
                },
                None,
                today(),
            )
            .unwrap()
            .id()
            .to_string();
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
        ledger.record_sale(&mut products, &id, "321", 1, now).unwrap();
        (products, ledger)
    }

    async fn round_trip(store: &dyn SnapshotStore) {
        assert!(load_products(store).await.unwrap().is_empty());
        assert!(load_sales(store).await.unwrap().is_empty());

        let (products, ledger) = sample();
        save_products(store, &products).await.unwrap();
        save_sales(store, &ledger).await.unwrap();

        assert_eq!(load_products(store).await.unwrap(), products);
        assert_eq!(load_sales(store).await.unwrap(), ledger);
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        round_trip(&MemorySnapshotStore::new()).await;
    }

    #[tokio::test]
    async fn test_sqlite_store_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        round_trip(&SqliteSnapshotStore::new(&db)).await;
    }

    #[tokio::test]
    async fn test_collections_use_browser_keys() {
        let store = MemorySnapshotStore::new();
        let (products, ledger) = sample();
        save_products(&store, &products).await.unwrap();
        save_sales(&store, &ledger).await.unwrap();

        let inventory = store.load("pex_inventory").await.unwrap().unwrap();
        assert!(inventory.starts_with('['));
        assert!(inventory.contains("\"expiryDate\":\"2027-01-01\""));
        assert!(store.load("pex_sales").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_reported() {
        let store = MemorySnapshotStore::new();
        store.save(INVENTORY_KEY, "{not json").await.unwrap();

        let err = load_products(&store).await.unwrap_err();
        assert!(matches!(err, DbError::Serialization { ref key, .. } if key == INVENTORY_KEY));
    }
}
