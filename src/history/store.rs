//! Bounded, deduplicated history of recent checks.

use std::collections::HashSet;

use log::{debug, warn};

use super::backend::KeyValueStore;
use super::types::HistoryEntry;
use crate::config::{HISTORY_MAX_ITEMS, HISTORY_STORAGE_KEY};
use crate::domain::normalize_domain;
use crate::error_handling::HistoryError;

/// Most-recent-first list of checks, unique by domain and capped in length.
///
/// Entries are loaded once when the store is opened and written back in full
/// after every change.
pub struct HistoryStore<S> {
    backend: S,
    entries: Vec<HistoryEntry>,
    max_items: usize,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Opens the history kept in `backend`.
    ///
    /// Stored data that does not parse is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself cannot be read.
    pub fn open(backend: S) -> Result<Self, HistoryError> {
        let entries = match backend.get(HISTORY_STORAGE_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding unreadable check history: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let entries = dedup_normalized(entries);
        debug!("Loaded {} history entries", entries.len());

        let mut store = Self {
            backend,
            entries,
            max_items: HISTORY_MAX_ITEMS,
        };
        store.entries.truncate(store.max_items);
        Ok(store)
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, domain: &str) -> Option<&HistoryEntry> {
        let domain = normalize_domain(domain);
        self.entries.iter().find(|e| e.domain == domain)
    }

    /// Inserts `entry` at the front, dropping any older entry for the same
    /// domain and evicting past the capacity.
    ///
    /// The entry's domain is normalized first, so `Example.com` and
    /// `example.com` share one slot.
    pub fn add(&mut self, mut entry: HistoryEntry) -> Result<(), HistoryError> {
        entry.domain = normalize_domain(&entry.domain);
        self.entries.retain(|e| e.domain != entry.domain);
        self.entries.insert(0, entry);
        self.entries.truncate(self.max_items);
        self.persist()
    }

    /// Removes the entry for `domain`. Returns whether one existed.
    pub fn remove(&mut self, domain: &str) -> Result<bool, HistoryError> {
        let domain = normalize_domain(domain);
        let before = self.entries.len();
        self.entries.retain(|e| e.domain != domain);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Drops every entry and deletes the stored key.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.backend.delete(HISTORY_STORAGE_KEY)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn persist(&self) -> Result<(), HistoryError> {
        let json = serde_json::to_string(&self.entries)?;
        self.backend.set(HISTORY_STORAGE_KEY, &json)
    }
}

/// Normalizes stored domains and keeps only the first (most recent) entry per domain.
fn dedup_normalized(entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|mut e| {
            e.domain = normalize_domain(&e.domain);
            e
        })
        .filter(|e| seen.insert(e.domain.clone()))
        .collect()
}
