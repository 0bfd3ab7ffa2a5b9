//! Record parsing and explanation.
//!
//! This module turns raw policy records into annotated, ordered entries:
//! - DMARC tag analysis (`v`, `p`, `sp`, `rua`, `ruf`, `pct`, alignment and reporting tags)
//! - SPF term analysis (mechanisms, qualifiers, modifiers, DNS lookup budget)
//!
//! Both analyzers are pure functions over the record text; the resolver never
//! calls them on its own.

mod dmarc;
mod spf;

use serde::{Deserialize, Serialize};

// Re-export public API
pub use dmarc::{analyze_dmarc_record, ParsedTag};
pub use spf::{analyze_spf_record, Qualifier, SpfAnalysis, SpfMechanism, SpfTerm, SpfTermKind};

/// How an entry in an analysis should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Correct and recommended.
    Good,
    /// Missing, malformed, or weakening the policy.
    Warning,
    /// Neither right nor wrong; context for the reader.
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Good => "good",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
