//! Score band types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Presentation band for a security score.
///
/// Bands are half-open on their lower bound: 80 and above is `Strong`,
/// 50 to 79 `Moderate`, 30 to 49 `Weak`, below 30 `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Critical,
    Weak,
    Moderate,
    Strong,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Strong,
            50..=79 => ScoreBand::Moderate,
            30..=49 => ScoreBand::Weak,
            _ => ScoreBand::Critical,
        }
    }

    /// Short label shown next to a score.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "Good",
            ScoreBand::Moderate => "Needs Improvement",
            ScoreBand::Weak => "Weak",
            ScoreBand::Critical => "Critical",
        }
    }

    /// One-line advice for the band.
    pub fn summary(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "Email authentication is well configured",
            ScoreBand::Moderate => "Some authentication records are missing or invalid",
            ScoreBand::Weak => "Most authentication records are missing or invalid",
            ScoreBand::Critical => "Domain is easy to spoof; publish DMARC, SPF and DKIM",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
