//! # Inventory Filter
//!
//! Derives the visible, sorted view of the product store.
//!
//! ```text
//! products ──► category ──► search ──► date range ──► section ──► transfer
//!                                                                   │
//!                         stable sort by days_to_expiry (asc) ◄─────┘
//! ```
//!
//! All predicates are ANDed. The view is recomputed on every call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{ExpiryStatus, Product};

/// Which slice of the store to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Every stocked entry (catalog hidden).
    #[default]
    Active,
    /// Catalog entries only.
    Catalog,
    /// Stocked entries in one urgency tier.
    Status(ExpiryStatus),
}

impl CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::Active => !product.is_catalog(),
            CategoryFilter::Catalog => product.is_catalog(),
            CategoryFilter::Status(status) => !product.is_catalog() && product.status() == *status,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "active" | "all" => Ok(CategoryFilter::Active),
            "catalog" => Ok(CategoryFilter::Catalog),
            other => other.parse::<ExpiryStatus>().map(CategoryFilter::Status),
        }
    }
}

/// Filter state of the inventory view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFilter {
    /// Matches name, barcode or batch.
    pub search: String,
    pub category: CategoryFilter,
    /// Inclusive lower bound on the expiry date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the expiry date.
    pub end_date: Option<NaiveDate>,
    pub section: String,
    pub transfer: String,
    /// Seller registration substring, applied to the sales report.
    pub seller: String,
}

impl InventoryFilter {
    /// Returns the matching products, stably sorted by days to expiry.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let search = self.search.trim();
        let search_lower = search.to_lowercase();

        let mut view: Vec<Product> = products
            .iter()
            .filter(|p| self.category.matches(p))
            .filter(|p| {
                search.is_empty()
                    || p.name.to_lowercase().contains(&search_lower)
                    || p.barcode.contains(search)
                    || p.batch.to_lowercase().contains(&search_lower)
            })
            .filter(|p| self.start_date.map_or(true, |start| p.expiry_date() >= start))
            .filter(|p| self.end_date.map_or(true, |end| p.expiry_date() <= end))
            .filter(|p| contains_ignore_case(&p.section, &self.section))
            .filter(|p| contains_ignore_case(&p.transfer, &self.transfer))
            .cloned()
            .collect();

        // sort_by_key is stable
        view.sort_by_key(|p| p.days_to_expiry());
        view
    }

    /// Number of non-default predicates, for the filter badge.
    /// The search box is not counted.
    pub fn active_count(&self) -> usize {
        [
            self.category != CategoryFilter::Active,
            self.start_date.is_some(),
            self.end_date.is_some(),
            !self.seller.trim().is_empty(),
            !self.section.trim().is_empty(),
            !self.transfer.trim().is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Empty needle matches anything; an empty haystack never matches a
/// non-empty needle.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ProductDraft, ProductStore};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn sample_store() -> ProductStore {
        let mut store = ProductStore::new();
        let stocked = |name: &str, barcode: &str, batch: &str, days: i64, section: &str| {
            ProductDraft {
                name: name.to_string(),
                barcode: barcode.to_string(),
                batch: batch.to_string(),
                quantity: Some(1),
                expiry_date: Some(today() + Duration::days(days)),
                section: section.to_string(),
                ..ProductDraft::default()
            }
        };

        store
            .upsert(stocked("safe item", "111", "AB1", 100, "A-1"), None, today())
            .unwrap();
        store
            .upsert(stocked("expired item", "222", "", -5, ""), None, today())
            .unwrap();
        store
            .upsert(stocked("critical item", "333", "XZ9", 10, "B-2"), None, today())
            .unwrap();
        store
            .upsert(
                ProductDraft {
                    name: "catalog item".to_string(),
                    barcode: "7890000000000".to_string(),
                    catalog: true,
                    ..ProductDraft::default()
                },
                None,
                today(),
            )
            .unwrap();
        store
    }

    fn names(view: &[Product]) -> Vec<&str> {
        view.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_hides_catalog_and_sorts_by_urgency() {
        let store = sample_store();
        let view = InventoryFilter::default().apply(store.products());
        assert_eq!(names(&view), vec!["EXPIRED ITEM", "CRITICAL ITEM", "SAFE ITEM"]);
    }

    #[test]
    fn test_catalog_category_returns_only_catalog() {
        let store = sample_store();
        let filter = InventoryFilter {
            category: CategoryFilter::Catalog,
            ..InventoryFilter::default()
        };
        assert_eq!(names(&filter.apply(store.products())), vec!["CATALOG ITEM"]);
    }

    #[test]
    fn test_status_category() {
        let store = sample_store();
        let filter = InventoryFilter {
            category: CategoryFilter::Status(ExpiryStatus::Safe),
            ..InventoryFilter::default()
        };
        // Catalog entries are SAFE but never appear under a tier.
        assert_eq!(names(&filter.apply(store.products())), vec!["SAFE ITEM"]);
    }

    #[test]
    fn test_search_fields_and_case_rules() {
        let store = sample_store();
        let search = |term: &str| {
            let filter = InventoryFilter {
                search: term.to_string(),
                ..InventoryFilter::default()
            };
            filter.apply(store.products()).len()
        };

        assert_eq!(search("critical"), 1, "name is case-insensitive");
        assert_eq!(search("22"), 1, "barcode substring");
        assert_eq!(search("xz9"), 1, "batch is case-insensitive");
        assert_eq!(search("item"), 3);
        assert_eq!(search("nothing"), 0);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let store = sample_store();
        let filter = InventoryFilter {
            start_date: Some(today() + Duration::days(10)),
            end_date: Some(today() + Duration::days(100)),
            ..InventoryFilter::default()
        };
        assert_eq!(
            names(&filter.apply(store.products())),
            vec!["CRITICAL ITEM", "SAFE ITEM"]
        );
    }

    #[test]
    fn test_catalog_compares_as_far_future_date() {
        let store = sample_store();
        let filter = InventoryFilter {
            category: CategoryFilter::Catalog,
            end_date: Some(today() + Duration::days(1000)),
            ..InventoryFilter::default()
        };
        assert!(filter.apply(store.products()).is_empty());
    }

    #[test]
    fn test_section_filter_skips_empty_fields() {
        let store = sample_store();
        let filter = InventoryFilter {
            section: "a-".to_string(),
            ..InventoryFilter::default()
        };
        assert_eq!(names(&filter.apply(store.products())), vec!["SAFE ITEM"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_days() {
        let mut store = ProductStore::new();
        for name in ["first", "second", "third"] {
            let draft = ProductDraft {
                name: name.to_string(),
                expiry_date: Some(today()),
                ..ProductDraft::default()
            };
            store.upsert(draft, None, today()).unwrap();
        }
        let view = InventoryFilter::default().apply(store.products());
        assert_eq!(names(&view), vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_active_count() {
        assert_eq!(InventoryFilter::default().active_count(), 0);
        let filter = InventoryFilter {
            search: "x".to_string(),
            category: CategoryFilter::Catalog,
            start_date: Some(today()),
            transfer: "filial".to_string(),
            ..InventoryFilter::default()
        };
        assert_eq!(filter.active_count(), 3);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::Active);
        assert_eq!("Catalog".parse::<CategoryFilter>().unwrap(), CategoryFilter::Catalog);
        assert_eq!(
            "expired".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Status(ExpiryStatus::Expired)
        );
        assert!("bogus".parse::<CategoryFilter>().is_err());
    }
}
