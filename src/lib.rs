//! mail_auth_check library: email authentication posture checks
//!
//! Looks up a domain's DMARC policy, SPF policy and DKIM keys over DNS,
//! explains DMARC and SPF records tag by tag, reduces the result to a 0-100
//! security score, runs throttled bulk checks, and keeps a short history of
//! recent checks.
//!
//! # Example
//!
//! ```no_run
//! use mail_auth_check::{check_domain, resolver_from_config, security_score, Config, ScoreBand};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = resolver_from_config(&Config::default())?;
//! let result = check_domain(&resolver, "example.com").await?;
//! let score = security_score(&result);
//! println!("{}: {} ({})", result.domain, score, ScoreBand::from_score(score));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! DNS lookups need a Tokio runtime. Record analysis, scoring and history do not.

pub mod bulk;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod generate;
pub mod history;
pub mod initialization;
pub mod models;
pub mod parse;
pub mod security;
pub mod server;

use hickory_resolver::TokioAsyncResolver;

// Re-export public API
pub use bulk::{BulkChecker, BulkJobState, BulkSlot, SlotStatus};
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{AuthResolver, DomainChecker, StaticLookup, TxtLookup};
pub use domain::DomainName;
pub use error_handling::{
    BulkError, CheckError, HistoryError, InitializationError, LookupError, ParseError,
};
pub use history::{FileStore, HistoryEntry, HistoryStore, KeyValueStore, MemoryStore};
pub use models::{AuthRecordStatus, AuthStatus, DkimProbeResult, DkimStatus, VerificationResult};
pub use parse::{analyze_dmarc_record, analyze_spf_record, ParsedTag, Severity, SpfAnalysis};
pub use security::{score_from_statuses, security_score, ScoreBand};

/// Normalizes `input` and checks its DMARC, SPF and DKIM records.
///
/// # Errors
///
/// Returns `CheckError` for empty or malformed input. No DNS query is made
/// in that case. Lookup failures never error; they become record statuses.
pub async fn check_domain<R: TxtLookup>(
    resolver: &AuthResolver<R>,
    input: &str,
) -> Result<VerificationResult, CheckError> {
    let domain = DomainName::parse(input)?;
    Ok(resolver.check(&domain).await)
}

/// Builds a resolver backed by system DNS with the configured timeout and
/// DKIM selectors.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` for an unusable timeout.
pub fn resolver_from_config(
    config: &Config,
) -> Result<AuthResolver<TokioAsyncResolver>, InitializationError> {
    let lookup = initialization::init_resolver(config.dns_timeout_secs)?;
    Ok(AuthResolver::new(lookup, config.dkim_selectors.clone()))
}
