//! The DNS authentication resolver.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use log::debug;

use super::extract::{classify_dmarc, classify_spf};
use super::records::TxtLookup;
use crate::config::DEFAULT_DKIM_SELECTORS;
use crate::domain::DomainName;
use crate::error_handling::{CheckError, LookupError, ProbeStats};
use crate::models::{DkimProbeResult, DkimStatus, VerificationResult};

/// Resolves a domain's DMARC, SPF and DKIM posture from DNS TXT records.
///
/// Stateless apart from the shared probe failure counters; one instance can
/// serve any number of concurrent checks.
pub struct AuthResolver<R> {
    lookup: R,
    selectors: Vec<String>,
    stats: Arc<ProbeStats>,
}

impl<R: TxtLookup> AuthResolver<R> {
    /// Creates a resolver probing the given DKIM selector candidates.
    pub fn new(lookup: R, selectors: Vec<String>) -> Self {
        Self {
            lookup,
            selectors,
            stats: Arc::new(ProbeStats::new()),
        }
    }

    /// Creates a resolver probing `DEFAULT_DKIM_SELECTORS`.
    pub fn with_default_selectors(lookup: R) -> Self {
        Self::new(
            lookup,
            DEFAULT_DKIM_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    /// Counters for probe failures downgraded to statuses.
    pub fn stats(&self) -> &Arc<ProbeStats> {
        &self.stats
    }

    /// Checks `domain`.
    ///
    /// The DMARC query, the SPF query and every DKIM selector probe run
    /// concurrently and are awaited together. Lookup failures of any kind end
    /// up as `not_found` for that probe, so this never fails.
    pub async fn check(&self, domain: &DomainName) -> VerificationResult {
        let dmarc_name = domain.dmarc_name();
        let (dmarc, spf, dkim) = tokio::join!(
            self.query(&dmarc_name),
            self.query(domain.as_str()),
            self.probe_dkim_selectors(domain),
        );

        let dmarc = classify_dmarc(&dmarc);
        let spf = classify_spf(&spf);
        let dkim_results: Vec<DkimProbeResult> = dkim
            .into_iter()
            .filter(|probe| probe.status == DkimStatus::Valid)
            .collect();

        debug!(
            "{}: dmarc={} spf={} dkim_selectors={}",
            domain,
            dmarc.status,
            spf.status,
            dkim_results.len()
        );

        VerificationResult {
            domain: domain.clone(),
            dmarc,
            spf,
            dkim_results,
        }
    }

    /// Probes every candidate selector concurrently and returns all outcomes,
    /// in candidate order.
    ///
    /// A selector is `valid` when its query answers with at least one record.
    pub async fn probe_dkim_selectors(&self, domain: &DomainName) -> Vec<DkimProbeResult> {
        let probes = self.selectors.iter().map(|selector| async move {
            let status = match self.query(&domain.dkim_name(selector)).await {
                Ok(records) if !records.is_empty() => DkimStatus::Valid,
                _ => DkimStatus::NotFound,
            };
            DkimProbeResult {
                selector: selector.clone(),
                status,
            }
        });
        join_all(probes).await
    }

    async fn query(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let result = self.lookup.lookup_txt(name).await;
        if let Err(e) = &result {
            self.stats.increment(e.kind());
            debug!("Probe {name} downgraded to not_found: {e}");
        }
        result
    }
}

/// Runs the single-domain pipeline from raw user input.
///
/// Implemented by `AuthResolver`; the bulk runner and HTTP API depend on this
/// trait so tests can substitute failing checkers.
pub trait DomainChecker: Send + Sync {
    /// Normalizes `input` and checks it.
    ///
    /// # Errors
    ///
    /// Returns a parameter error for empty or malformed domains, before any
    /// DNS traffic.
    fn check_domain(
        &self,
        input: &str,
    ) -> impl Future<Output = Result<VerificationResult, CheckError>> + Send;
}

impl<R: TxtLookup> DomainChecker for AuthResolver<R> {
    async fn check_domain(&self, input: &str) -> Result<VerificationResult, CheckError> {
        let domain = DomainName::parse(input)?;
        Ok(self.check(&domain).await)
    }
}

impl<T: DomainChecker> DomainChecker for Arc<T> {
    fn check_domain(
        &self,
        input: &str,
    ) -> impl Future<Output = Result<VerificationResult, CheckError>> + Send {
        (**self).check_domain(input)
    }
}
