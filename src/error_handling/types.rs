//! Error type definitions.
//!
//! This module defines the errors surfaced by each stage of a check, plus the
//! per-probe DNS failure kinds that are counted but never propagated.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Errors that fail a single-domain check as a whole.
///
/// Only input validation fails before DNS traffic; per-probe lookup failures
/// are folded into record statuses and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// No domain was supplied (or only whitespace).
    #[error("Domain is required")]
    EmptyDomain,

    /// The supplied domain could not be normalized into a usable name.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Something outside the per-probe boundary failed.
    ///
    /// `AuthResolver` never returns this, since its probe failures become
    /// `not_found`. Other `DomainChecker` implementations report unexpected
    /// failures through it, which the bulk runner records as an errored slot
    /// and the API answers with 500.
    #[error("Error checking domain records: {0}")]
    Resolution(String),
}

impl CheckError {
    /// Whether the error was caused by caller input (400) rather than the checker (500).
    pub fn is_client_error(&self) -> bool {
        matches!(self, CheckError::EmptyDomain | CheckError::InvalidDomain(_))
    }
}

/// Errors from the record analyzers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Blank input.
    #[error("Please enter a DMARC record")]
    EmptyInput,

    /// Input contained only separators.
    #[error("No valid DMARC tags found")]
    NoValidTags,

    /// Blank SPF analyzer input.
    #[error("Please enter an SPF record")]
    EmptySpfInput,

    /// SPF analyzer input without the `v=spf1` version term.
    #[error("Record does not start with v=spf1")]
    NotSpf,
}

/// Errors rejecting a bulk job before any lookup happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BulkError {
    /// Nothing in the input looked like a domain.
    #[error("Please enter at least one domain")]
    NoDomains,

    /// The input listed more domains than one job may check.
    #[error("Maximum {max} domains at a time ({count} supplied)")]
    TooManyDomains {
        /// Domains found in the input
        count: usize,
        /// Capacity of a single job
        max: usize,
    },
}

/// Errors from the check history store.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The backing key-value store failed.
    #[error("History storage error: {0}")]
    Storage(String),

    /// History could not be serialized.
    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File-backed store I/O failure.
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A failed DNS TXT query for one probe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name does not exist.
    #[error("NXDOMAIN: domain does not exist")]
    NxDomain,

    /// The name exists but has no TXT data.
    #[error("no records found")]
    NoRecords,

    /// The resolver gave up waiting.
    #[error("DNS query timed out")]
    Timeout,

    /// Transport failure, malformed response, SERVFAIL, and the rest.
    #[error("DNS error: {0}")]
    Other(String),
}

impl LookupError {
    /// Classifies a resolver error message.
    ///
    /// Matching on text mirrors how hickory reports failures across versions.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("nxdomain") {
            LookupError::NxDomain
        } else if lower.contains("no records found") || lower.contains("no record found") {
            LookupError::NoRecords
        } else if lower.contains("timeout") || lower.contains("timed out") {
            LookupError::Timeout
        } else {
            LookupError::Other(message.to_string())
        }
    }

    /// Counter bucket for this failure.
    pub fn kind(&self) -> ProbeFailure {
        match self {
            LookupError::NxDomain => ProbeFailure::NxDomain,
            LookupError::NoRecords => ProbeFailure::NoRecords,
            LookupError::Timeout => ProbeFailure::Timeout,
            LookupError::Other(_) => ProbeFailure::Other,
        }
    }
}

/// Kinds of probe failures tracked across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ProbeFailure {
    NxDomain,
    NoRecords,
    Timeout,
    Other,
}

impl std::fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProbeFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeFailure::NxDomain => "DNS NXDOMAIN",
            ProbeFailure::NoRecords => "DNS no records",
            ProbeFailure::Timeout => "DNS timeout",
            ProbeFailure::Other => "DNS other error",
        }
    }
}
