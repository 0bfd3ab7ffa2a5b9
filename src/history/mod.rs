//! Check history.
//!
//! Keeps the ten most recent checks, one per domain, in a pluggable
//! key-value store (in memory for tests, a JSON file for the CLI).

mod backend;
mod store;
mod types;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use store::HistoryStore;
pub use types::HistoryEntry;
