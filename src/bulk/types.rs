//! Bulk job state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{AuthStatus, VerificationResult};
use crate::security::security_score;

/// Lifecycle of one domain in a bulk job: `Pending -> Checking -> Complete | Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Pending,
    Checking,
    Complete,
    Error,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Pending => "pending",
            SlotStatus::Checking => "checking",
            SlotStatus::Complete => "complete",
            SlotStatus::Error => "error",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, SlotStatus::Complete | SlotStatus::Error)
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One domain's row in a bulk job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSlot {
    /// Domain as supplied in the input list.
    pub domain: String,
    pub status: SlotStatus,
    pub dmarc: Option<AuthStatus>,
    pub spf: Option<AuthStatus>,
    /// DKIM summary: valid when any selector was found.
    pub dkim: Option<AuthStatus>,
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VerificationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkSlot {
    pub fn pending(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            status: SlotStatus::Pending,
            dmarc: None,
            spf: None,
            dkim: None,
            score: None,
            result: None,
            error: None,
        }
    }

    pub(crate) fn complete(&mut self, result: VerificationResult) {
        self.status = SlotStatus::Complete;
        self.dmarc = Some(result.dmarc.status);
        self.spf = Some(result.spf.status);
        self.dkim = Some(result.dkim_summary());
        self.score = Some(security_score(&result));
        self.result = Some(result);
        self.error = None;
    }

    pub(crate) fn fail(&mut self, error: impl Into<String>) {
        self.status = SlotStatus::Error;
        self.dmarc = Some(AuthStatus::Error);
        self.spf = Some(AuthStatus::Error);
        self.dkim = Some(AuthStatus::Error);
        self.score = Some(0);
        self.result = None;
        self.error = Some(error.into());
    }
}

/// Ordered slots of a bulk job, one per input domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkJobState {
    pub slots: Vec<BulkSlot>,
}

impl BulkJobState {
    pub fn new(domains: Vec<String>) -> Self {
        Self {
            slots: domains.into_iter().map(BulkSlot::pending).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.slots.iter().all(|s| s.status.is_finished())
    }

    pub fn summary(&self) -> BulkSummary {
        let count = |status: SlotStatus| self.slots.iter().filter(|s| s.status == status).count();
        let complete_scores: Vec<u8> = self
            .slots
            .iter()
            .filter(|s| s.status == SlotStatus::Complete)
            .filter_map(|s| s.score)
            .collect();
        let mean_score = if complete_scores.is_empty() {
            None
        } else {
            let sum: u32 = complete_scores.iter().map(|&s| u32::from(s)).sum();
            Some(f64::from(sum) / complete_scores.len() as f64)
        };

        BulkSummary {
            total: self.slots.len(),
            complete: count(SlotStatus::Complete),
            errored: count(SlotStatus::Error),
            pending: count(SlotStatus::Pending) + count(SlotStatus::Checking),
            mean_score,
        }
    }
}

/// Counts over a bulk job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BulkSummary {
    pub total: usize,
    pub complete: usize,
    pub errored: usize,
    pub pending: usize,
    /// Mean score over completed slots.
    pub mean_score: Option<f64>,
}
