//! DNS record extraction utilities.
//!
//! This module picks DMARC and SPF records out of TXT record collections and
//! classifies the lookup outcome. Only the version prefix is checked; tag and
//! mechanism semantics belong to the analyzers in `crate::parse`.

use crate::config::{DMARC_PREFIX, SPF_PREFIX};
use crate::error_handling::LookupError;
use crate::models::AuthRecordStatus;

/// Extracts SPF record from TXT records.
///
/// SPF records start with "v=spf1". Every record is scanned since SPF
/// usually shares the apex with site-verification tokens.
///
/// # Returns
///
/// The first SPF record found, or `None` if no SPF record exists.
pub fn extract_spf_record(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.starts_with(SPF_PREFIX))
        .cloned()
}

/// Extracts DMARC record from TXT records.
///
/// DMARC records start with "v=DMARC1".
///
/// # Returns
///
/// The first DMARC record found, or `None` if no DMARC record exists.
pub fn extract_dmarc_record(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.starts_with(DMARC_PREFIX))
        .cloned()
}

/// Classifies the outcome of the `_dmarc.<domain>` query.
pub fn classify_dmarc(lookup: &Result<Vec<String>, LookupError>) -> AuthRecordStatus {
    classify(lookup, extract_dmarc_record)
}

/// Classifies the outcome of the apex TXT query for SPF.
pub fn classify_spf(lookup: &Result<Vec<String>, LookupError>) -> AuthRecordStatus {
    classify(lookup, extract_spf_record)
}

fn classify(
    lookup: &Result<Vec<String>, LookupError>,
    extract: fn(&[String]) -> Option<String>,
) -> AuthRecordStatus {
    match lookup {
        Ok(records) if records.is_empty() => AuthRecordStatus::not_found(),
        Ok(records) => match extract(records) {
            Some(record) => AuthRecordStatus::valid(record),
            None => AuthRecordStatus::invalid(),
        },
        Err(_) => AuthRecordStatus::not_found(),
    }
}
