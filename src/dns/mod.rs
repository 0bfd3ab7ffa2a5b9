//! DNS authentication record resolution.
//!
//! This module provides async TXT lookups using `hickory-resolver` and the
//! `AuthResolver` that turns them into a `VerificationResult`:
//! - DMARC policy at `_dmarc.<domain>`
//! - SPF policy among the TXT records at the domain apex
//! - DKIM keys at `<selector>._domainkey.<domain>` for a list of candidate selectors
//!
//! All probes for one domain run concurrently; a failing probe is downgraded
//! to a status and never aborts its siblings.

mod extract;
mod records;
mod resolver;

// Re-export public API
pub use extract::{classify_dmarc, classify_spf, extract_dmarc_record, extract_spf_record};
pub use records::{lookup_txt_records, StaticLookup, TxtLookup};
pub use resolver::{AuthResolver, DomainChecker};
