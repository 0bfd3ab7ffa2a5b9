//! Domain list parsing.

use crate::error_handling::BulkError;

/// Splits free text into candidate domains.
///
/// Entries are separated by newlines, commas or semicolons, trimmed, and
/// kept only when they contain a `.`. Order and duplicates are preserved.
pub fn parse_domain_list(input: &str) -> Vec<String> {
    input
        .split(['\n', ',', ';'])
        .map(str::trim)
        .filter(|candidate| candidate.contains('.'))
        .map(str::to_string)
        .collect()
}

/// Parses and enforces the batch size limit.
///
/// # Errors
///
/// `BulkError::NoDomains` when nothing usable remains, and
/// `BulkError::TooManyDomains` when more than `max` domains were supplied.
pub fn parse_bounded_domain_list(input: &str, max: usize) -> Result<Vec<String>, BulkError> {
    let domains = parse_domain_list(input);
    if domains.is_empty() {
        return Err(BulkError::NoDomains);
    }
    if domains.len() > max {
        return Err(BulkError::TooManyDomains {
            count: domains.len(),
            max,
        });
    }
    Ok(domains)
}
