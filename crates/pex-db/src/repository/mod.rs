//! # Repository Module
//!
//! Database repository implementations for PEX.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteSnapshotStore (storage.rs)                                       │
//! │       │                                                                 │
//! │       │  db.snapshots().put("pex_inventory", json)                      │
//! │       ▼                                                                 │
//! │  SnapshotRepository                                                     │
//! │  ├── get(&self, key)                                                    │
//! │  ├── put(&self, key, value)                                             │
//! │  ├── delete(&self, key)                                                 │
//! │  └── keys(&self)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  snapshots table                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - JSON documents by key

pub mod snapshot;
