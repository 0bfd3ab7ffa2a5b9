//! SPF term analysis.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use super::Severity;
use crate::config::{SPF_LOOKUP_WARNING_THRESHOLD, SPF_MAX_DNS_LOOKUPS};
use crate::error_handling::ParseError;

/// Qualifier prefix on an SPF mechanism. Defaults to Pass if omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    Pass,     // +
    Fail,     // -
    SoftFail, // ~
    Neutral,  // ?
}

impl Qualifier {
    /// Parse a single-char qualifier prefix. Returns the qualifier (if one was
    /// written) and the remaining str.
    pub fn parse_prefix(s: &str) -> (Option<Qualifier>, &str) {
        match s.as_bytes().first() {
            Some(b'+') => (Some(Qualifier::Pass), &s[1..]),
            Some(b'-') => (Some(Qualifier::Fail), &s[1..]),
            Some(b'~') => (Some(Qualifier::SoftFail), &s[1..]),
            Some(b'?') => (Some(Qualifier::Neutral), &s[1..]),
            _ => (None, s),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Qualifier::Pass => '+',
            Qualifier::Fail => '-',
            Qualifier::SoftFail => '~',
            Qualifier::Neutral => '?',
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// SPF mechanism names (RFC 7208 Section 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpfMechanism {
    All,
    Include,
    A,
    Mx,
    Ptr,
    Ip4,
    Ip6,
    Exists,
}

impl SpfMechanism {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(SpfMechanism::All),
            "include" => Some(SpfMechanism::Include),
            "a" => Some(SpfMechanism::A),
            "mx" => Some(SpfMechanism::Mx),
            "ptr" => Some(SpfMechanism::Ptr),
            "ip4" => Some(SpfMechanism::Ip4),
            "ip6" => Some(SpfMechanism::Ip6),
            "exists" => Some(SpfMechanism::Exists),
            _ => None,
        }
    }

    /// Whether evaluating this mechanism costs a DNS query.
    pub fn needs_dns_lookup(&self) -> bool {
        matches!(
            self,
            SpfMechanism::Include
                | SpfMechanism::A
                | SpfMechanism::Mx
                | SpfMechanism::Ptr
                | SpfMechanism::Exists
        )
    }
}

/// What kind of term an `SpfTerm` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "name")]
pub enum SpfTermKind {
    Mechanism(SpfMechanism),
    /// `name=value`; `redirect` and `exp` are the defined ones.
    Modifier(String),
    /// Neither a known mechanism nor a modifier.
    Unknown,
}

/// One whitespace-separated term of an SPF record, explained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpfTerm {
    /// The term exactly as written.
    pub term: String,
    pub kind: SpfTermKind,
    pub qualifier: Option<Qualifier>,
    pub value: Option<String>,
    pub description: String,
    pub status: Severity,
}

/// Result of analyzing an SPF record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpfAnalysis {
    pub terms: Vec<SpfTerm>,
    /// Terms that cost a DNS query at evaluation time (`redirect` included).
    pub dns_lookup_count: usize,
    /// Record-wide findings (lookup budget, missing `all`).
    pub findings: Vec<(Severity, String)>,
}

impl SpfAnalysis {
    pub fn has_warnings(&self) -> bool {
        self.terms.iter().any(|t| t.status == Severity::Warning)
            || self.findings.iter().any(|(s, _)| *s == Severity::Warning)
    }
}

/// Breaks an SPF record into explained terms.
///
/// The record must start with `v=spf1` (case-insensitive). Remaining terms
/// are split on whitespace and classified as mechanisms
/// (`[qualifier]name[:arg][/cidr]`) or modifiers (`name=value`).
///
/// # Errors
///
/// `ParseError::EmptySpfInput` for blank input, `ParseError::NotSpf` when the
/// version term is missing.
pub fn analyze_spf_record(record: &str) -> Result<SpfAnalysis, ParseError> {
    let trimmed = record.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptySpfInput);
    }

    let mut words = trimmed.split_whitespace();
    match words.next() {
        Some(version) if version.eq_ignore_ascii_case("v=spf1") => {}
        _ => return Err(ParseError::NotSpf),
    }

    let terms: Vec<SpfTerm> = words.map(explain_term).collect();

    let dns_lookup_count = terms
        .iter()
        .filter(|t| match &t.kind {
            SpfTermKind::Mechanism(m) => m.needs_dns_lookup(),
            SpfTermKind::Modifier(name) => name == "redirect",
            SpfTermKind::Unknown => false,
        })
        .count();

    let mut findings = Vec::new();
    if dns_lookup_count > SPF_MAX_DNS_LOOKUPS {
        findings.push((
            Severity::Warning,
            format!(
                "{dns_lookup_count} DNS lookups exceeds the {SPF_MAX_DNS_LOOKUPS} DNS lookup limit; receivers will return permerror"
            ),
        ));
    } else if dns_lookup_count > SPF_LOOKUP_WARNING_THRESHOLD {
        findings.push((
            Severity::Info,
            format!(
                "{dns_lookup_count} DNS lookups is close to the {SPF_MAX_DNS_LOOKUPS} DNS lookup limit"
            ),
        ));
    }

    let ends_policy = terms.iter().any(|t| {
        t.kind == SpfTermKind::Mechanism(SpfMechanism::All)
            || t.kind == SpfTermKind::Modifier("redirect".to_string())
    });
    if !ends_policy {
        findings.push((
            Severity::Info,
            "No all mechanism: unmatched senders get a neutral result".to_string(),
        ));
    }

    Ok(SpfAnalysis {
        terms,
        dns_lookup_count,
        findings,
    })
}

fn explain_term(term: &str) -> SpfTerm {
    if let Some((name, value)) = split_modifier(term) {
        let lower = name.to_ascii_lowercase();
        let (description, status) = match lower.as_str() {
            "redirect" => (
                format!("Use the SPF policy of {value} when nothing else matches"),
                Severity::Info,
            ),
            "exp" => (
                format!("Explanation text for failures is published at {value}"),
                Severity::Info,
            ),
            _ => ("Unknown modifier, ignored by receivers".to_string(), Severity::Info),
        };
        return SpfTerm {
            term: term.to_string(),
            kind: SpfTermKind::Modifier(lower),
            qualifier: None,
            value: Some(value.to_string()),
            description,
            status,
        };
    }

    let (qualifier, rest) = Qualifier::parse_prefix(term);
    let (name, value) = match rest.find([':', '/']) {
        Some(pos) if rest.as_bytes()[pos] == b':' => (&rest[..pos], Some(&rest[pos + 1..])),
        Some(pos) => (&rest[..pos], Some(&rest[pos..])),
        None => (rest, None),
    };

    let Some(mechanism) = SpfMechanism::from_name(&name.to_ascii_lowercase()) else {
        return SpfTerm {
            term: term.to_string(),
            kind: SpfTermKind::Unknown,
            qualifier,
            value: value.map(str::to_string),
            description: format!("Unknown mechanism '{name}'; receivers will return permerror"),
            status: Severity::Warning,
        };
    };

    let effective = qualifier.unwrap_or(Qualifier::Pass);
    let (description, status) = describe_mechanism(mechanism, effective, value);

    SpfTerm {
        term: term.to_string(),
        kind: SpfTermKind::Mechanism(mechanism),
        qualifier,
        value: value.map(str::to_string),
        description,
        status,
    }
}

/// Splits `name=value` when `name` is alphabetic and not a mechanism name.
fn split_modifier(term: &str) -> Option<(&str, &str)> {
    let (name, value) = term.split_once('=')?;
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return None;
    }
    if !name.as_bytes()[0].is_ascii_alphabetic() {
        return None;
    }
    if SpfMechanism::from_name(&name.to_ascii_lowercase()).is_some() {
        return None;
    }
    Some((name, value))
}

fn describe_mechanism(
    mechanism: SpfMechanism,
    qualifier: Qualifier,
    value: Option<&str>,
) -> (String, Severity) {
    let arg = value.unwrap_or("");
    match mechanism {
        SpfMechanism::All => match qualifier {
            Qualifier::Fail => (
                "Hard fail: reject mail from servers not listed".to_string(),
                Severity::Good,
            ),
            Qualifier::SoftFail => (
                "Soft fail: accept but mark mail from servers not listed".to_string(),
                Severity::Info,
            ),
            Qualifier::Neutral => (
                "Neutral: no statement about servers not listed".to_string(),
                Severity::Warning,
            ),
            Qualifier::Pass => (
                "Pass all: any server may send as this domain".to_string(),
                Severity::Warning,
            ),
        },
        SpfMechanism::Include => {
            if arg.is_empty() {
                ("include requires a domain".to_string(), Severity::Warning)
            } else {
                (
                    format!("Authorize servers listed in the SPF record of {arg}"),
                    Severity::Good,
                )
            }
        }
        SpfMechanism::A => (
            format!("Authorize the A/AAAA addresses of {}", domain_or_self(arg)),
            Severity::Good,
        ),
        SpfMechanism::Mx => (
            format!("Authorize the mail exchangers of {}", domain_or_self(arg)),
            Severity::Good,
        ),
        SpfMechanism::Ptr => (
            "ptr is deprecated (RFC 7208) and slow; list addresses instead".to_string(),
            Severity::Warning,
        ),
        SpfMechanism::Ip4 => {
            let addr = arg.split('/').next().unwrap_or("");
            if addr.parse::<Ipv4Addr>().is_ok() && cidr_ok(arg, 32) {
                (format!("Authorize IPv4 range {arg}"), Severity::Good)
            } else {
                (format!("Invalid IPv4 address or range '{arg}'"), Severity::Warning)
            }
        }
        SpfMechanism::Ip6 => {
            let addr = arg.split('/').next().unwrap_or("");
            if addr.parse::<Ipv6Addr>().is_ok() && cidr_ok(arg, 128) {
                (format!("Authorize IPv6 range {arg}"), Severity::Good)
            } else {
                (format!("Invalid IPv6 address or range '{arg}'"), Severity::Warning)
            }
        }
        SpfMechanism::Exists => (
            format!("Match when {arg} resolves to an A record"),
            Severity::Info,
        ),
    }
}

fn domain_or_self(arg: &str) -> &str {
    if arg.is_empty() || arg.starts_with('/') {
        "this domain"
    } else {
        arg
    }
}

fn cidr_ok(arg: &str, max: u8) -> bool {
    match arg.split_once('/') {
        Some((_, len)) => len.parse::<u8>().map(|l| l <= max).unwrap_or(false),
        None => true,
    }
}
