//! Sequential bulk checker.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use log::{info, warn};

use super::input::parse_bounded_domain_list;
use super::types::{BulkJobState, SlotStatus};
use crate::config::{BULK_INTER_DOMAIN_DELAY, BULK_MAX_DOMAINS};
use crate::dns::DomainChecker;
use crate::error_handling::BulkError;

/// Runs the single-domain check over a list of domains, one at a time.
///
/// Domains are never checked concurrently. After each domain finishes the
/// runner waits `delay` before starting the next one (no wait after the
/// last). A failure or panic while checking one domain marks only that
/// slot as `error`.
pub struct BulkChecker<C> {
    checker: C,
    delay: Duration,
    max_domains: usize,
}

impl<C: DomainChecker> BulkChecker<C> {
    pub fn new(checker: C) -> Self {
        Self {
            checker,
            delay: BULK_INTER_DOMAIN_DELAY,
            max_domains: BULK_MAX_DOMAINS,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_max_domains(mut self, max_domains: usize) -> Self {
        self.max_domains = max_domains;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Parses `input` and checks every domain in order.
    ///
    /// `on_progress` is called with the whole job state and the index of the
    /// slot that just changed: once when it enters `checking` and once when
    /// it reaches `complete` or `error`.
    ///
    /// # Errors
    ///
    /// Returns `BulkError` when the input is empty or over capacity. Both are
    /// raised before any lookup is made.
    pub async fn run<F>(&self, input: &str, mut on_progress: F) -> Result<BulkJobState, BulkError>
    where
        F: FnMut(&BulkJobState, usize),
    {
        let domains = parse_bounded_domain_list(input, self.max_domains)?;
        let total = domains.len();
        let mut state = BulkJobState::new(domains);
        info!("Starting bulk check of {} domains", total);

        for index in 0..total {
            let domain = state.slots[index].domain.clone();
            state.slots[index].status = SlotStatus::Checking;
            info!("[{}/{}] Checking {}", index + 1, total, domain);
            on_progress(&state, index);

            let outcome = AssertUnwindSafe(self.checker.check_domain(&domain))
                .catch_unwind()
                .await;

            let slot = &mut state.slots[index];
            match outcome {
                Ok(Ok(result)) => {
                    slot.complete(result);
                    info!(
                        "[{}/{}] {} complete, score {}",
                        index + 1,
                        total,
                        domain,
                        slot.score.unwrap_or(0)
                    );
                }
                Ok(Err(e)) => {
                    warn!("[{}/{}] {} failed: {}", index + 1, total, domain, e);
                    slot.fail(e.to_string());
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    warn!("[{}/{}] {} failed: {}", index + 1, total, domain, message);
                    slot.fail(message);
                }
            }
            on_progress(&state, index);

            if index + 1 < total {
                tokio::time::sleep(self.delay).await;
            }
        }

        let summary = state.summary();
        info!(
            "Bulk check finished: {} complete, {} errors",
            summary.complete, summary.errored
        );
        Ok(state)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked".to_string()
    }
}
