//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including DNS timeouts, batch limits, and history bounds.

use std::time::Duration;

// Network operation timeouts
/// DNS query timeout in seconds
/// Most TXT lookups complete in well under a second; 5s keeps slow authoritative
/// servers from stalling a whole check.
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// Attempts per DNS query made by the underlying resolver
pub const DNS_ATTEMPTS: usize = 2;

// DNS record locations and prefixes
/// Label prepended to a domain to find its DMARC policy
pub const DMARC_LABEL: &str = "_dmarc";
/// Label appended to a selector to find its DKIM key
pub const DKIM_LABEL: &str = "_domainkey";
/// Prefix a DMARC TXT record must start with
pub const DMARC_PREFIX: &str = "v=DMARC1";
/// Prefix an SPF TXT record must start with
pub const SPF_PREFIX: &str = "v=spf1";

/// Common DKIM selectors probed when checking a domain.
///
/// Selectors cannot be enumerated over DNS, so the resolver guesses from
/// well-known provider conventions. Override via `Config::dkim_selectors`.
pub const DEFAULT_DKIM_SELECTORS: &[&str] = &[
    "default",
    "google",
    "selector1",
    "selector2",
    "k1",
    "dkim",
    "mail",
    "s1",
    "s2",
];

// Bulk checking
/// Maximum number of domains accepted in one bulk job
pub const BULK_MAX_DOMAINS: usize = 50;
/// Cooldown after each domain in a bulk job before starting the next
pub const BULK_INTER_DOMAIN_DELAY: Duration = Duration::from_millis(500);

// Check history
/// Maximum number of entries kept in the check history
pub const HISTORY_MAX_ITEMS: usize = 10;
/// Key under which the history list is persisted
pub const HISTORY_STORAGE_KEY: &str = "dmarc_check_history";
/// Default directory for the file-backed history store
pub const DEFAULT_HISTORY_PATH: &str = ".mail_auth_check";

// SPF
/// RFC 7208 limit on DNS-querying terms in an SPF evaluation
pub const SPF_MAX_DNS_LOOKUPS: usize = 10;
/// Lookup count above which an SPF record is flagged as getting close to the limit
pub const SPF_LOOKUP_WARNING_THRESHOLD: usize = 7;

// HTTP API
/// Default port for the HTTP API server
pub const DEFAULT_API_PORT: u16 = 8787;
