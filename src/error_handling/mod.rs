//! Error handling and probe statistics.
//!
//! This module provides:
//! - Error type definitions for each stage of a check
//! - Classification of DNS lookup failures
//! - Thread-safe counters for downgraded probe failures
//!
//! Input validation errors fail fast; probe failures are counted, logged and
//! folded into record statuses.

mod stats;
mod types;

// Re-export public API
pub use stats::ProbeStats;
pub use types::{
    BulkError, CheckError, HistoryError, InitializationError, LookupError, ParseError,
    ProbeFailure,
};
