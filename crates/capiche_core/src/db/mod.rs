//! SQLite bootstrap for the native key-value store.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing `SqliteStore`.
//! - Bring the `kv_entries` schema up to date before a store is built.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Failures surface as `StoreError`; there is no separate db error type.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
