//! Domain name normalization.
//!
//! Users paste all sorts of things into a domain field: full URLs, `www.`
//! hosts, trailing paths. `DomainName` reduces them to the bare name the DNS
//! probes are built from.
//!
//! Key functions:
//! - `DomainName::parse()` - Normalizes and validates user input
//! - `normalize_domain()` - The normalization step on its own

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error_handling::CheckError;

/// A normalized, validated domain name.
///
/// Invariant: non-empty, lowercase, contains at least one `.`, no scheme,
/// no leading `www.`, no path, port, query or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Normalizes `input` and validates the result.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::EmptyDomain` for blank input and
    /// `CheckError::InvalidDomain` when the normalized name is unusable.
    pub fn parse(input: &str) -> Result<Self, CheckError> {
        if input.trim().is_empty() {
            return Err(CheckError::EmptyDomain);
        }

        let normalized = normalize_domain(input);
        if normalized.is_empty() {
            return Err(CheckError::EmptyDomain);
        }
        if !normalized.contains('.') {
            return Err(CheckError::InvalidDomain(format!(
                "'{}' is not a fully qualified domain",
                input.trim()
            )));
        }
        if normalized.starts_with('.')
            || normalized.contains("..")
            || normalized
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(CheckError::InvalidDomain(format!(
                "'{}' is not a valid domain name",
                input.trim()
            )));
        }

        Ok(DomainName(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `_dmarc.<domain>`
    pub fn dmarc_name(&self) -> String {
        format!("{}.{}", crate::config::DMARC_LABEL, self.0)
    }

    /// `<selector>._domainkey.<domain>`
    pub fn dkim_name(&self, selector: &str) -> String {
        format!("{}.{}.{}", selector, crate::config::DKIM_LABEL, self.0)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strips scheme, leading `www.`, path, query, fragment, port and trailing
/// dot from `input`, and lowercases the result.
///
/// Does not validate; an empty string comes back for inputs with no host part.
pub fn normalize_domain(input: &str) -> String {
    let mut rest = input.trim();

    for scheme in ["https://", "http://"] {
        if let Some(head) = rest.get(..scheme.len()) {
            if head.eq_ignore_ascii_case(scheme) {
                rest = &rest[scheme.len()..];
                break;
            }
        }
    }

    // Host ends at the first path, query or fragment delimiter
    if let Some(end) = rest.find(['/', '?', '#']) {
        rest = &rest[..end];
    }
    if let Some(end) = rest.find(':') {
        rest = &rest[..end];
    }

    let mut host = rest.trim_end_matches('.').to_lowercase();
    if let Some(stripped) = host.strip_prefix("www.") {
        host = stripped.to_string();
    }
    host
}
