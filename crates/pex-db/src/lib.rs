//! # pex-db: Storage Layer for PEX
//!
//! Durable storage for the PEX validity tracker: a SQLite file holding one
//! JSON document per collection, the same layout the browser version kept in
//! local storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PEX Data Flow                                    │
//! │                                                                         │
//! │  pex CLI command (e.g. `sale record`)                                   │
//! │       │  load_products / save_products                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     pex-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ SnapshotStore │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │ (storage.rs)  │───►│ (snapshot.rs) │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │                        ┌───────▼───────┐                      │   │
//! │  │                        │   Database    │                      │   │
//! │  │                        │   (pool.rs)   │                      │   │
//! │  │                        └───────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/pex/pex.db  ── table `snapshots`                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pex_db::{load_products, Database, DbConfig, SqliteSnapshotStore};
//!
//! let db = Database::new(DbConfig::new("pex.db")).await?;
//! let store = SqliteSnapshotStore::new(&db);
//! let products = load_products(&store).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::SnapshotRepository;
pub use storage::{
    load_products, load_sales, save_products, save_sales, MemorySnapshotStore, SnapshotStore,
    SqliteSnapshotStore,
};
