//! # State Module
//!
//! Two focused state types instead of one big struct:
//!
//! ```text
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │     InventoryState       │   │        AppConfig         │
//! │                          │   │                          │
//! │  • ProductStore          │   │  • data dir / db file    │
//! │  • SaleLedger            │   │  • login                 │
//! │  • SnapshotStore port    │   │  • advice API settings   │
//! └──────────────────────────┘   └──────────────────────────┘
//!        mutable, saved              read-only after start-up
//! ```

mod config;
mod inventory;

pub use config::{AppConfig, DATABASE_FILE, DEFAULT_GEMINI_MODEL};
pub use inventory::InventoryState;
