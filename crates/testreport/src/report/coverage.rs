//! Line coverage aggregate

use crate::result::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};

/// Covered/total line counts for a report, module or file.
///
/// `covered_lines <= total_lines` always holds; both constructors and
/// deserialization reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CoverageRepr")]
pub struct Coverage {
    covered_lines: u64,
    total_lines: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoverageRepr {
    covered_lines: u64,
    total_lines: u64,
}

impl TryFrom<CoverageRepr> for Coverage {
    type Error = ReportError;

    fn try_from(repr: CoverageRepr) -> ReportResult<Self> {
        Self::new(repr.covered_lines, repr.total_lines)
    }
}

impl Coverage {
    /// Create coverage from line counts
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidCoverage`] if more lines are covered
    /// than exist.
    pub fn new(covered_lines: u64, total_lines: u64) -> ReportResult<Self> {
        if covered_lines > total_lines {
            return Err(ReportError::InvalidCoverage {
                covered_lines,
                total_lines,
            });
        }
        Ok(Self {
            covered_lines,
            total_lines,
        })
    }

    /// Number of covered lines
    #[must_use]
    pub const fn covered_lines(&self) -> u64 {
        self.covered_lines
    }

    /// Number of coverable lines
    #[must_use]
    pub const fn total_lines(&self) -> u64 {
        self.total_lines
    }

    /// Coverage as a percentage in `0.0..=100.0`; zero when there are no lines.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total_lines == 0 {
            return 0.0;
        }
        self.covered_lines as f64 / self.total_lines as f64 * 100.0
    }
}
