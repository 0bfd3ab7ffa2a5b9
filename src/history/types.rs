//! History entry type.

use serde::{Deserialize, Serialize};

use crate::models::{AuthStatus, VerificationResult};
use crate::security::security_score;

/// Summary of one past check.
///
/// Stored as `{domain, timestamp, dmarcStatus, spfStatus, dkimStatus, score}`
/// with `timestamp` in milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub domain: String,
    pub timestamp: i64,
    pub dmarc_status: AuthStatus,
    pub spf_status: AuthStatus,
    pub dkim_status: AuthStatus,
    pub score: u8,
}

impl HistoryEntry {
    /// Summarizes `result` as checked at `timestamp` (ms).
    pub fn from_result(result: &VerificationResult, timestamp: i64) -> Self {
        Self {
            domain: result.domain.as_str().to_string(),
            timestamp,
            dmarc_status: result.dmarc.status,
            spf_status: result.spf.status,
            dkim_status: result.dkim_summary(),
            score: security_score(result),
        }
    }

    /// Same as `from_result`, stamped with the current time.
    pub fn now(result: &VerificationResult) -> Self {
        Self::from_result(result, chrono::Utc::now().timestamp_millis())
    }
}
