//! Verification result types shared by the resolver, scorer, bulk runner and history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainName;

/// Outcome of a DMARC or SPF lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// A record with the expected version prefix was published.
    Valid,
    /// TXT records exist but none carry the expected prefix.
    Invalid,
    /// The query failed or returned nothing.
    NotFound,
    /// Sentinel for checks that could not run at all (bulk failures).
    Error,
}

impl AuthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStatus::Valid => "valid",
            AuthStatus::Invalid => "invalid",
            AuthStatus::NotFound => "not_found",
            AuthStatus::Error => "error",
        }
    }

    /// Human-readable form used in exports and terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            AuthStatus::NotFound => "not found",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of one DMARC or SPF lookup plus the record that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRecordStatus {
    pub status: AuthStatus,
    /// The matching record; present only when `status` is `Valid`.
    pub record: Option<String>,
}

impl AuthRecordStatus {
    pub fn valid(record: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Valid,
            record: Some(record.into()),
        }
    }

    pub fn invalid() -> Self {
        Self {
            status: AuthStatus::Invalid,
            record: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: AuthStatus::NotFound,
            record: None,
        }
    }
}

/// Outcome of probing a single DKIM selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DkimStatus {
    Valid,
    NotFound,
}

/// A DKIM selector candidate and what its probe found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkimProbeResult {
    pub selector: String,
    pub status: DkimStatus,
}

/// Combined DMARC/SPF/DKIM posture of one domain.
///
/// `dkim_results` only lists selectors whose probe found a record; an empty
/// list means no candidate selector is published.
///
/// Serializes to the flat wire shape
/// `{domain, dmarc, dmarcRecord?, spf, spfRecord?, dkimResults}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "VerificationWire", from = "VerificationWire")]
pub struct VerificationResult {
    pub domain: DomainName,
    pub dmarc: AuthRecordStatus,
    pub spf: AuthRecordStatus,
    pub dkim_results: Vec<DkimProbeResult>,
}

impl VerificationResult {
    /// Whether at least one probed selector published a DKIM key.
    pub fn has_valid_dkim(&self) -> bool {
        self.dkim_results
            .iter()
            .any(|probe| probe.status == DkimStatus::Valid)
    }

    /// Single DKIM status for tabular views (bulk export, history).
    pub fn dkim_summary(&self) -> AuthStatus {
        if self.has_valid_dkim() {
            AuthStatus::Valid
        } else {
            AuthStatus::NotFound
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerificationWire {
    domain: DomainName,
    dmarc: AuthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dmarc_record: Option<String>,
    spf: AuthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spf_record: Option<String>,
    #[serde(default)]
    dkim_results: Vec<DkimProbeResult>,
}

impl From<VerificationResult> for VerificationWire {
    fn from(r: VerificationResult) -> Self {
        Self {
            domain: r.domain,
            dmarc: r.dmarc.status,
            dmarc_record: r.dmarc.record,
            spf: r.spf.status,
            spf_record: r.spf.record,
            dkim_results: r.dkim_results,
        }
    }
}

impl From<VerificationWire> for VerificationResult {
    fn from(w: VerificationWire) -> Self {
        Self {
            domain: w.domain,
            dmarc: AuthRecordStatus {
                status: w.dmarc,
                record: w.dmarc_record,
            },
            spf: AuthRecordStatus {
                status: w.spf,
                record: w.spf_record,
            },
            dkim_results: w.dkim_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VerificationResult {
        VerificationResult {
            domain: DomainName::parse("example.com").unwrap(),
            dmarc: AuthRecordStatus::valid("v=DMARC1; p=reject"),
            spf: AuthRecordStatus::not_found(),
            dkim_results: vec![DkimProbeResult {
                selector: "google".into(),
                status: DkimStatus::Valid,
            }],
        }
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["domain"], "example.com");
        assert_eq!(json["dmarc"], "valid");
        assert_eq!(json["dmarcRecord"], "v=DMARC1; p=reject");
        assert_eq!(json["spf"], "not_found");
        assert!(json.get("spfRecord").is_none());
        assert_eq!(json["dkimResults"][0]["selector"], "google");
        assert_eq!(json["dkimResults"][0]["status"], "valid");
    }

    #[test]
    fn test_wire_deserializes_back() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: VerificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_dkim_summary() {
        let mut result = sample();
        assert_eq!(result.dkim_summary(), AuthStatus::Valid);
        result.dkim_results.clear();
        assert!(!result.has_valid_dkim());
        assert_eq!(result.dkim_summary(), AuthStatus::NotFound);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(AuthStatus::NotFound.as_str(), "not_found");
        assert_eq!(AuthStatus::NotFound.to_string(), "not found");
        assert_eq!(AuthStatus::Error.to_string(), "error");
    }
}
