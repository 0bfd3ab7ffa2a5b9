//! DMARC tag analysis.

use serde::{Deserialize, Serialize};

use super::Severity;
use crate::error_handling::ParseError;

const POLICIES: [&str; 3] = ["none", "quarantine", "reject"];

/// One DMARC tag with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTag {
    /// Display label, e.g. `p (Policy)` or `Missing: v`.
    pub tag: String,
    /// Raw tag name as written in the record.
    pub key: String,
    pub value: String,
    pub description: String,
    pub status: Severity,
}

impl ParsedTag {
    fn new(
        tag: impl Into<String>,
        key: &str,
        value: &str,
        description: impl Into<String>,
        status: Severity,
    ) -> Self {
        Self {
            tag: tag.into(),
            key: key.to_string(),
            value: value.to_string(),
            description: description.into(),
            status,
        }
    }

    /// Whether this entry was synthesized for a missing required tag.
    pub fn is_missing_marker(&self) -> bool {
        self.tag.starts_with("Missing: ")
    }
}

/// Breaks a DMARC record into explained tags.
///
/// The record is split on `;`, empty segments are dropped, and each segment
/// is split on its first `=`. Output follows the record's tag order. When the
/// record has no `v` tag a `Missing: v` warning is placed first; when it has
/// no `p` tag a `Missing: p` warning is placed last.
///
/// # Errors
///
/// `ParseError::EmptyInput` for blank input, `ParseError::NoValidTags` when
/// only separators remain after splitting.
pub fn analyze_dmarc_record(record: &str) -> Result<Vec<ParsedTag>, ParseError> {
    if record.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut results: Vec<ParsedTag> = record
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (segment, ""),
            };
            explain_tag(key, value)
        })
        .collect();

    if results.is_empty() {
        return Err(ParseError::NoValidTags);
    }

    let has_version = results.iter().any(|r| r.key == "v");
    let has_policy = results.iter().any(|r| r.key == "p");

    if !has_version {
        results.insert(
            0,
            ParsedTag::new(
                "Missing: v",
                "v",
                "",
                "Version tag is required! Should be v=DMARC1",
                Severity::Warning,
            ),
        );
    }
    if !has_policy {
        results.push(ParsedTag::new(
            "Missing: p",
            "p",
            "",
            "Policy tag is required! Should be p=none, p=quarantine, or p=reject",
            Severity::Warning,
        ));
    }

    Ok(results)
}

fn explain_tag(key: &str, value: &str) -> ParsedTag {
    match key {
        "v" => {
            if value == "DMARC1" {
                ParsedTag::new("v (Version)", key, value, "Correct version identifier", Severity::Good)
            } else {
                ParsedTag::new(
                    "v (Version)",
                    key,
                    value,
                    "Invalid version - should be DMARC1",
                    Severity::Warning,
                )
            }
        }
        "p" => {
            let description = match value {
                "none" => "Monitoring only - no action taken on failed emails. Good for initial deployment.",
                "quarantine" => "Failed emails sent to spam. Recommended after monitoring period.",
                "reject" => "Failed emails blocked entirely. Strongest protection, use with caution.",
                _ => "Invalid policy value",
            };
            ParsedTag::new("p (Policy)", key, value, description, policy_severity(value))
        }
        "sp" => {
            let description = match value {
                "none" => "Subdomains: Monitoring only",
                "quarantine" => "Subdomains: Failed emails sent to spam",
                "reject" => "Subdomains: Failed emails blocked",
                _ => "Invalid subdomain policy",
            };
            ParsedTag::new(
                "sp (Subdomain Policy)",
                key,
                value,
                description,
                policy_severity(value),
            )
        }
        "rua" => ParsedTag::new(
            "rua (Aggregate Reports)",
            key,
            value,
            format!(
                "Aggregate reports sent to: {value}. You'll receive daily summaries of authentication results."
            ),
            mailto_severity(value),
        ),
        "ruf" => ParsedTag::new(
            "ruf (Forensic Reports)",
            key,
            value,
            format!(
                "Forensic reports sent to: {value}. Individual failure reports (can be high volume)."
            ),
            mailto_severity(value),
        ),
        "pct" => {
            let (description, status) = match value.parse::<i64>() {
                Ok(100) => (
                    format!("Policy applied to {value}% of emails. Policy applied to all emails."),
                    Severity::Good,
                ),
                Ok(pct) if (0..100).contains(&pct) => (
                    format!(
                        "Policy applied to {value}% of emails. Partial percentages are a testing stage; consider increasing to 100 after testing."
                    ),
                    Severity::Info,
                ),
                _ => (
                    format!("Percentage '{value}' is not a whole number between 0 and 100."),
                    Severity::Info,
                ),
            };
            ParsedTag::new("pct (Percentage)", key, value, description, status)
        }
        "adkim" => ParsedTag::new(
            "adkim (DKIM Alignment)",
            key,
            value,
            alignment_description("DKIM", value),
            Severity::Info,
        ),
        "aspf" => ParsedTag::new(
            "aspf (SPF Alignment)",
            key,
            value,
            alignment_description("SPF", value),
            Severity::Info,
        ),
        "fo" => {
            let description = match value {
                "0" => "Generate report if both SPF and DKIM fail",
                "1" => "Generate report if either SPF or DKIM fails",
                "d" => "Generate report if DKIM fails",
                "s" => "Generate report if SPF fails",
                _ => "Forensic options set",
            };
            ParsedTag::new("fo (Forensic Options)", key, value, description, Severity::Info)
        }
        "rf" => ParsedTag::new(
            "rf (Report Format)",
            key,
            value,
            format!("Report format: {value} (usually 'afrf' for Auth Failure Reporting Format)"),
            Severity::Info,
        ),
        "ri" => {
            let description = match value.parse::<u64>() {
                Ok(seconds) => format!(
                    "Reports sent every {value} seconds ({} hours)",
                    (seconds as f64 / 3600.0).round() as u64
                ),
                Err(_) => format!("Reporting interval '{value}' is not a number of seconds"),
            };
            ParsedTag::new("ri (Report Interval)", key, value, description, Severity::Info)
        }
        _ => ParsedTag::new(key, key, value, "Unknown or custom tag", Severity::Info),
    }
}

fn policy_severity(value: &str) -> Severity {
    if POLICIES.contains(&value) {
        Severity::Good
    } else {
        Severity::Warning
    }
}

fn mailto_severity(value: &str) -> Severity {
    if value.contains("mailto:") {
        Severity::Good
    } else {
        Severity::Warning
    }
}

fn alignment_description(mechanism: &str, value: &str) -> String {
    if value == "s" {
        format!("Strict alignment - {mechanism} domain must exactly match From domain")
    } else {
        format!("Relaxed alignment - {mechanism} can be on subdomain (default)")
    }
}
