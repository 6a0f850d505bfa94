//! Report Formatters
//!
//! Stateless projections of a [`Report`] into text. Each call builds fresh
//! intermediate values and only reads the report, so one report may be
//! rendered from many threads at once.

mod json;

pub use json::JsonFormatter;

use crate::report::{Report, TestStatus};
use crate::result::ReportResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Options accepted by every formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Statuses to render; also selects which repeatable tests are considered
    pub include: BTreeSet<TestStatus>,
    /// Render one row per execution instead of one merged row per test
    pub include_device_details: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include: TestStatus::ALL.into_iter().collect(),
            include_device_details: false,
        }
    }
}

impl RenderOptions {
    /// Create default options: every status, merged rows
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict rendered statuses
    #[must_use]
    pub fn with_include(mut self, include: impl IntoIterator<Item = TestStatus>) -> Self {
        self.include = include.into_iter().collect();
        self
    }

    /// Toggle per-device rows
    #[must_use]
    pub const fn with_device_details(mut self, include_device_details: bool) -> Self {
        self.include_device_details = include_device_details;
        self
    }
}

/// A projection of a report into a textual document
pub trait Formatter {
    /// Render `report` under `options`
    ///
    /// # Errors
    ///
    /// Returns an error only if the projection cannot be encoded.
    fn format(&self, report: &Report, options: &RenderOptions) -> ReportResult<String>;
}

/// Render a report as canonical JSON
pub fn render(report: &Report, options: &RenderOptions) -> ReportResult<String> {
    JsonFormatter::new().format(report, options)
}
