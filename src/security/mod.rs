//! Security scoring.
//!
//! Reduces a DMARC/SPF/DKIM verification result to a single score:
//! - DMARC: 40 valid, 10 invalid, 0 otherwise
//! - SPF: 30 valid, 10 invalid, 0 otherwise
//! - DKIM: 30 when any probed selector is valid
//!
//! Scores map onto a `ScoreBand` for display.

mod analysis;
mod types;

pub use analysis::{score_from_statuses, security_score};
pub use types::ScoreBand;
