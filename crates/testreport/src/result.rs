//! Result and error types for report loading and rendering.

use thiserror::Error;

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while loading or rendering a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// The rendered projection could not be encoded
    #[error("Encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A report document could not be loaded
    #[error("Invalid report: {message}")]
    Decoding {
        /// Error message
        message: String,
    },

    /// Coverage claims more covered lines than exist
    #[error("Invalid coverage: {covered_lines} covered of {total_lines} total lines")]
    InvalidCoverage {
        /// Covered line count
        covered_lines: u64,
        /// Total line count
        total_lines: u64,
    },

    /// A repeatable test was given no executions
    #[error("Repeatable test '{name}' has no executions")]
    EmptyRepeatableTest {
        /// Test name
        name: String,
    },

    /// An execution does not belong to the repeatable test holding it
    #[error("Execution '{found}' does not match repeatable test '{expected}'")]
    MismatchedExecution {
        /// Name of the repeatable test
        expected: String,
        /// Name carried by the execution
        found: String,
    },

    /// Two siblings in a name-keyed set share a name
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName {
        /// Kind of entity (module, suite, file, test)
        kind: &'static str,
        /// The repeated name
        name: String,
    },

    /// Unrecognised test status identifier
    #[error("Unknown test status: {value}")]
    UnknownStatus {
        /// The rejected value
        value: String,
    },

    /// Unrecognised issue type identifier
    #[error("Unknown issue type: {value}")]
    UnknownIssueType {
        /// The rejected value
        value: String,
    },
}

impl ReportError {
    /// Create a decoding error
    #[must_use]
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
        }
    }

    /// Create a duplicate name error
    #[must_use]
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Create an unknown status error
    #[must_use]
    pub fn unknown_status(value: impl Into<String>) -> Self {
        Self::UnknownStatus {
            value: value.into(),
        }
    }

    /// Create an unknown issue type error
    #[must_use]
    pub fn unknown_issue_type(value: impl Into<String>) -> Self {
        Self::UnknownIssueType {
            value: value.into(),
        }
    }
}
