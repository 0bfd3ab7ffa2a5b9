//! TXT record queries.
//!
//! `TxtLookup` is the seam between the resolver logic and the network: the
//! hickory resolver implements it for real lookups and `StaticLookup` serves
//! canned answers for offline use and tests.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::LookupError;

/// Something that can answer DNS TXT queries.
pub trait TxtLookup: Send + Sync {
    /// Returns every TXT string published at `name`, in answer order.
    ///
    /// Multi-chunk TXT records are joined into one string.
    fn lookup_txt(&self, name: &str)
        -> impl Future<Output = Result<Vec<String>, LookupError>> + Send;
}

impl TxtLookup for TokioAsyncResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        lookup_txt_records(name, self).await
    }
}

/// Queries TXT (text) records for a name.
///
/// # Arguments
///
/// * `name` - The fully qualified name to query
/// * `resolver` - The DNS resolver instance
///
/// # Returns
///
/// A vector of TXT record strings.
///
/// # Errors
///
/// NXDOMAIN and "no records found" are reported as `LookupError::NxDomain` /
/// `LookupError::NoRecords` so callers can fold them into a not-found status.
/// Timeouts and transport failures are logged at warn level.
pub async fn lookup_txt_records(
    name: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, LookupError> {
    match resolver.lookup(name, RecordType::TXT).await {
        Ok(lookup) => {
            let txt_records: Vec<String> = lookup
                .iter()
                .filter_map(|rdata| {
                    if let RData::TXT(txt) = rdata {
                        // TXT records can contain multiple strings - join them
                        Some(
                            txt.iter()
                                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                                .collect::<Vec<String>>()
                                .join(""),
                        )
                    } else {
                        None
                    }
                })
                .collect();
            Ok(txt_records)
        }
        Err(e) => {
            let error = LookupError::from_message(&e.to_string());
            match error {
                LookupError::NxDomain | LookupError::NoRecords => {
                    log::debug!("No TXT records at {name}: {e}");
                }
                LookupError::Timeout => {
                    log::warn!("TXT record lookup timed out for {name}: {e}");
                }
                LookupError::Other(_) => {
                    log::warn!("Failed to lookup TXT records for {name}: {e}");
                }
            }
            Err(error)
        }
    }
}

/// In-memory TXT lookup table.
///
/// Names without an entry answer `LookupError::NxDomain`. An optional delay is
/// applied to every answer, which makes concurrency observable under a paused
/// tokio clock.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    answers: HashMap<String, Result<Vec<String>, LookupError>>,
    delay: Option<Duration>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `records` at `name`.
    pub fn with_txt<I, S>(mut self, name: &str, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers.insert(
            name.to_lowercase(),
            Ok(records.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Makes queries for `name` fail with `error`.
    pub fn with_error(mut self, name: &str, error: LookupError) -> Self {
        self.answers.insert(name.to_lowercase(), Err(error));
        self
    }

    /// Delays every answer by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl TxtLookup for StaticLookup {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answers
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or(Err(LookupError::NxDomain))
    }
}
