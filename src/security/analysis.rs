//! Weighted security score.

use crate::models::{AuthStatus, VerificationResult};

const DMARC_VALID_POINTS: u8 = 40;
const SPF_VALID_POINTS: u8 = 30;
const DKIM_VALID_POINTS: u8 = 30;
const INVALID_RECORD_POINTS: u8 = 10;

/// Scores a verification result in `0..=100`.
///
/// Depends only on the DMARC status, the SPF status and whether any DKIM
/// selector was valid.
pub fn security_score(result: &VerificationResult) -> u8 {
    score_from_statuses(
        result.dmarc.status,
        result.spf.status,
        result.has_valid_dkim(),
    )
}

/// Scores a status triple directly. Used where only summaries are kept
/// (history entries, bulk slots).
pub fn score_from_statuses(dmarc: AuthStatus, spf: AuthStatus, any_dkim_valid: bool) -> u8 {
    let dmarc_points = match dmarc {
        AuthStatus::Valid => DMARC_VALID_POINTS,
        AuthStatus::Invalid => INVALID_RECORD_POINTS,
        AuthStatus::NotFound | AuthStatus::Error => 0,
    };
    let spf_points = match spf {
        AuthStatus::Valid => SPF_VALID_POINTS,
        AuthStatus::Invalid => INVALID_RECORD_POINTS,
        AuthStatus::NotFound | AuthStatus::Error => 0,
    };
    let dkim_points = if any_dkim_valid { DKIM_VALID_POINTS } else { 0 };

    dmarc_points + spf_points + dkim_points
}
