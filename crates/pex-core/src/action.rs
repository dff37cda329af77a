//! # Destructive Actions
//!
//! Irreversible operations are first described, then confirmed, then
//! applied. The description carries everything a confirmation prompt needs.
//!
//! ```text
//! DestructiveAction::DeleteProduct { .. }
//!        │
//!        ├── title() / message() / confirm_label()  → prompt
//!        │
//!        ├── declined  → nothing happens
//!        └── confirmed → apply(store, ledger)
//! ```

use std::collections::HashSet;

use crate::ledger::SaleLedger;
use crate::store::ProductStore;

/// An operation that needs explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructiveAction {
    DeleteProduct { id: String, name: String },
    DeleteMany { ids: Vec<String> },
    ClearSales { count: usize },
}

impl DestructiveAction {
    pub fn title(&self) -> &'static str {
        match self {
            DestructiveAction::DeleteProduct { .. } => "Delete product",
            DestructiveAction::DeleteMany { .. } => "Delete selected products",
            DestructiveAction::ClearSales { .. } => "Clear sales history",
        }
    }

    pub fn message(&self) -> String {
        match self {
            DestructiveAction::DeleteProduct { name, .. } => {
                format!("Remove \"{name}\" from the inventory? This cannot be undone.")
            }
            DestructiveAction::DeleteMany { ids } => {
                format!("Remove {} product(s) from the inventory? This cannot be undone.", ids.len())
            }
            DestructiveAction::ClearSales { count } => {
                format!("Erase all {count} recorded sale(s)? This cannot be undone.")
            }
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            DestructiveAction::DeleteProduct { .. } | DestructiveAction::DeleteMany { .. } => {
                "Delete"
            }
            DestructiveAction::ClearSales { .. } => "Clear",
        }
    }

    /// True when the action touches the product store (vs the ledger).
    pub fn affects_products(&self) -> bool {
        !matches!(self, DestructiveAction::ClearSales { .. })
    }

    /// Performs the action. Returns the number of records removed.
    pub fn apply(&self, store: &mut ProductStore, ledger: &mut SaleLedger) -> usize {
        match self {
            DestructiveAction::DeleteProduct { id, .. } => usize::from(store.remove(id).is_some()),
            DestructiveAction::DeleteMany { ids } => {
                let ids: HashSet<String> = ids.iter().cloned().collect();
                store.remove_many(&ids)
            }
            DestructiveAction::ClearSales { .. } => ledger.clear(),
        }
    }
}
