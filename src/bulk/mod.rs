//! Bulk domain checking.
//!
//! Accepts a free-text list of domains, checks them strictly one after
//! another with a cooldown in between, and exposes per-slot progress.

mod input;
mod runner;
mod types;

pub use input::{parse_bounded_domain_list, parse_domain_list};
pub use runner::BulkChecker;
pub use types::{BulkJobState, BulkSlot, BulkSummary, SlotStatus};
