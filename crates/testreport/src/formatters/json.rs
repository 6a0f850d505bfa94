//! Canonical JSON Formatter
//!
//! ## Document shape
//!
//! ```text
//! {
//!   "coverage": { "coveredLines", "percentage", "totalLines" }?,
//!   "modules": [ {
//!     "coverage"?, "name",
//!     "files":  [ { "coverage"?, "name", "warnings": [ { "message", "type" } ] } ],
//!     "suites": [ { "name", "tests": [ { "durationMs", "message"?, "name", "status" } ] } ]
//!   } ]
//! }
//! ```
//!
//! Absent optional values are omitted, never written as `null`. Object keys
//! are sorted and the output is pretty-printed so diffs stay stable.

use super::{Formatter, RenderOptions};
use crate::ordering::sorted_by_name;
use crate::report::{
    filter_by_status, Coverage, File, Issue, Module, Report, Suite, TestExecution, TestStatus,
};
use crate::result::ReportResult;
use serde::Serialize;
use std::collections::BTreeSet;

/// Renders a report as pretty-printed JSON with sorted keys
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a JSON formatter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &Report, options: &RenderOptions) -> ReportResult<String> {
        tracing::debug!(
            modules = report.modules().len(),
            include = %joined(&options.include),
            include_device_details = options.include_device_details,
            "formatting report as JSON"
        );

        let projection = JsonReport::new(report, options);
        // Round-trip through Value so keys come out sorted even if a struct's
        // field order drifts.
        let value = serde_json::to_value(&projection)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

fn joined(statuses: &BTreeSet<TestStatus>) -> String {
    statuses
        .iter()
        .map(TestStatus::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

// Fields below are declared in alphabetical order to match the output.

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<JsonCoverage>,
    modules: Vec<JsonModule<'a>>,
}

impl<'a> JsonReport<'a> {
    fn new(report: &'a Report, options: &'a RenderOptions) -> Self {
        Self {
            coverage: report.coverage().map(JsonCoverage::from),
            modules: sorted_by_name(report.modules())
                .into_iter()
                .map(|module| JsonModule::new(module, options))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct JsonModule<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<JsonCoverage>,
    files: Vec<JsonFile<'a>>,
    name: &'a str,
    suites: Vec<JsonSuite<'a>>,
}

impl<'a> JsonModule<'a> {
    fn new(module: &'a Module, options: &'a RenderOptions) -> Self {
        Self {
            coverage: module.coverage().map(JsonCoverage::from),
            files: sorted_by_name(module.files())
                .into_iter()
                .map(JsonFile::from)
                .collect(),
            name: module.name(),
            suites: sorted_by_name(module.suites())
                .into_iter()
                .map(|suite| JsonSuite::new(suite, options))
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonCoverage {
    covered_lines: u64,
    percentage: f64,
    total_lines: u64,
}

impl From<&Coverage> for JsonCoverage {
    fn from(coverage: &Coverage) -> Self {
        Self {
            covered_lines: coverage.covered_lines(),
            percentage: coverage.percentage(),
            total_lines: coverage.total_lines(),
        }
    }
}

#[derive(Serialize)]
struct JsonFile<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<JsonCoverage>,
    name: &'a str,
    warnings: Vec<JsonWarning<'a>>,
}

impl<'a> From<&'a File> for JsonFile<'a> {
    fn from(file: &'a File) -> Self {
        Self {
            coverage: file.coverage().map(JsonCoverage::from),
            name: file.name(),
            warnings: file.issues().iter().map(JsonWarning::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct JsonWarning<'a> {
    message: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> From<&'a Issue> for JsonWarning<'a> {
    fn from(issue: &'a Issue) -> Self {
        Self {
            message: &issue.message,
            kind: issue.kind.as_str(),
        }
    }
}

#[derive(Serialize)]
struct JsonSuite<'a> {
    name: &'a str,
    tests: Vec<JsonTest<'a>>,
}

impl<'a> JsonSuite<'a> {
    fn new(suite: &'a Suite, options: &'a RenderOptions) -> Self {
        let include = &options.include;
        let filter_device = !options.include_device_details;

        let tests = sorted_by_name(filter_by_status(suite.repeatable_tests(), include))
            .into_iter()
            .flat_map(|test| test.merged_executions(filter_device))
            .filter(|execution| include.contains(&execution.status))
            .map(JsonTest::from)
            .collect();

        Self {
            name: suite.name(),
            tests,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonTest<'a> {
    duration_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    name: &'a str,
    status: &'static str,
}

impl<'a> From<&'a TestExecution> for JsonTest<'a> {
    fn from(execution: &'a TestExecution) -> Self {
        Self {
            duration_ms: execution.duration_ms(),
            message: execution.message.as_deref(),
            name: &execution.name,
            status: execution.status.as_str(),
        }
    }
}
