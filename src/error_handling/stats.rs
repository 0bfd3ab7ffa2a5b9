//! Probe failure statistics.
//!
//! This module provides thread-safe counters for DNS probe failures that were
//! downgraded to record statuses during a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ProbeFailure;

/// Thread-safe probe failure tracker.
///
/// Every `ProbeFailure` kind is initialized to zero on creation, so concurrent
/// probes can share one instance behind an `Arc`.
pub struct ProbeStats {
    failures: HashMap<ProbeFailure, AtomicUsize>,
}

impl ProbeStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for failure in ProbeFailure::iter() {
            failures.insert(failure, AtomicUsize::new(0));
        }
        ProbeStats { failures }
    }

    /// Increment a failure counter.
    pub fn increment(&self, failure: ProbeFailure) {
        if let Some(counter) = self.failures.get(&failure) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment probe counter for {:?} which is not in the map",
                failure
            );
        }
    }

    pub fn get_count(&self, failure: ProbeFailure) -> usize {
        self.failures
            .get(&failure)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Logs non-zero counters at info level.
    pub fn log_summary(&self) {
        let total = self.total();
        if total == 0 {
            return;
        }
        log::info!("Probe failures ({} total):", total);
        for failure in ProbeFailure::iter() {
            let count = self.get_count(failure);
            if count > 0 {
                log::info!("   {}: {}", failure.as_str(), count);
            }
        }
    }
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::new()
    }
}
