//! API server state and response bodies.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bulk::{BulkChecker, BulkJobState};
use crate::models::VerificationResult;
use crate::security::{security_score, ScoreBand};

/// Shared state for the API server.
pub struct ApiState<C> {
    pub checker: Arc<C>,
    pub bulk: Arc<BulkChecker<Arc<C>>>,
    pub progress: BulkProgress,
}

impl<C: crate::dns::DomainChecker> ApiState<C> {
    pub fn new(checker: C) -> Self {
        let checker = Arc::new(checker);
        Self {
            bulk: Arc::new(BulkChecker::new(Arc::clone(&checker))),
            checker,
            progress: BulkProgress::default(),
        }
    }

    /// Replaces the bulk runner, e.g. to change its cooldown.
    pub fn with_bulk(mut self, bulk: BulkChecker<Arc<C>>) -> Self {
        self.bulk = Arc::new(bulk);
        self
    }
}

impl<C> Clone for ApiState<C> {
    fn clone(&self) -> Self {
        Self {
            checker: Arc::clone(&self.checker),
            bulk: Arc::clone(&self.bulk),
            progress: self.progress.clone(),
        }
    }
}

/// Progress counters of the most recent bulk job.
#[derive(Clone, Default, Debug)]
pub struct BulkProgress {
    pub total: Arc<AtomicUsize>,
    pub completed: Arc<AtomicUsize>,
    pub errored: Arc<AtomicUsize>,
    pub running: Arc<AtomicBool>,
}

impl BulkProgress {
    /// Claims the counters for a new job. Returns `false` while another job
    /// still holds them.
    pub(crate) fn try_start(&self) -> bool {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }
        self.total.store(0, Ordering::SeqCst);
        self.completed.store(0, Ordering::SeqCst);
        self.errored.store(0, Ordering::SeqCst);
        true
    }

    pub(crate) fn update(&self, state: &BulkJobState) {
        let summary = state.summary();
        self.total.store(summary.total, Ordering::SeqCst);
        self.completed.store(summary.complete, Ordering::SeqCst);
        self.errored.store(summary.errored, Ordering::SeqCst);
    }

    pub(crate) fn finish(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub record: Option<String>,
}

/// `GET /api/check-domain` body: the verification result plus its score.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    #[serde(flatten)]
    pub result: VerificationResult,
    pub score: u8,
    pub score_label: &'static str,
}

impl From<VerificationResult> for CheckResponse {
    fn from(result: VerificationResult) -> Self {
        let score = security_score(&result);
        Self {
            result,
            score,
            score_label: ScoreBand::from_score(score).label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// JSON response for `/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub total: usize,
    pub completed: usize,
    pub errored: usize,
    pub pending: usize,
    pub percentage_complete: f64,
    pub running: bool,
}
