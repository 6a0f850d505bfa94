//! Test report data model
//!
//! # Hierarchy
//!
//! ```text
//! Report ──► Module ──► Suite ──► RepeatableTest ──► TestExecution
//!               │
//!               └─────► File ──► Issue
//! ```
//!
//! The tree is built once by ingestion and then only read. Every level
//! exclusively owns its children; there are no back-references. Siblings
//! in each set are unique by name.

mod coverage;
mod execution;
mod merge;

pub use coverage::Coverage;
pub use execution::{Device, TestExecution, TestStatus};
pub use merge::{filter_by_status, RepeatableTest};

use crate::ordering::Named;
use crate::result::{ReportError, ReportResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Category of a file diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueType {
    /// Compiler or analyzer warning
    Warning,
    /// Informational note
    Note,
}

impl IssueType {
    /// Every known issue type
    pub const ALL: [Self; 2] = [Self::Warning, Self::Note];

    /// Stable identifier used in rendered output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = ReportError;

    fn from_str(s: &str) -> ReportResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ReportError::unknown_issue_type(s))
    }
}

/// A diagnostic attached to a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue category
    #[serde(rename = "type")]
    pub kind: IssueType,
    /// Diagnostic text
    pub message: String,
}

impl Issue {
    /// Create a warning
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: IssueType::Warning,
            message: message.into(),
        }
    }

    /// Create a note
    #[must_use]
    pub fn note(message: impl Into<String>) -> Self {
        Self {
            kind: IssueType::Note,
            message: message.into(),
        }
    }
}

/// A source file with optional coverage and its diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coverage: Option<Coverage>,
    #[serde(default)]
    issues: Vec<Issue>,
}

impl File {
    /// Create a file with no coverage or issues
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coverage: None,
            issues: Vec::new(),
        }
    }

    /// Set coverage
    #[must_use]
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = Some(coverage);
        self
    }

    /// Append an issue
    #[must_use]
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    /// File name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File coverage, if measured
    #[must_use]
    pub const fn coverage(&self) -> Option<&Coverage> {
        self.coverage.as_ref()
    }

    /// Diagnostics in ingestion order
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

/// A named collection of repeatable tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    name: String,
    #[serde(default, deserialize_with = "unique_by_name")]
    repeatable_tests: Vec<RepeatableTest>,
}

impl Suite {
    /// Create an empty suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repeatable_tests: Vec::new(),
        }
    }

    /// Add a repeatable test, replacing any with the same name
    #[must_use]
    pub fn with_test(mut self, test: RepeatableTest) -> Self {
        upsert(&mut self.repeatable_tests, test);
        self
    }

    /// Suite name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repeatable tests in ingestion order
    #[must_use]
    pub fn repeatable_tests(&self) -> &[RepeatableTest] {
        &self.repeatable_tests
    }
}

/// A build module: suites, files and module-level coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coverage: Option<Coverage>,
    #[serde(default, deserialize_with = "unique_by_name")]
    files: Vec<File>,
    #[serde(default, deserialize_with = "unique_by_name")]
    suites: Vec<Suite>,
}

impl Module {
    /// Create an empty module
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coverage: None,
            files: Vec::new(),
            suites: Vec::new(),
        }
    }

    /// Set coverage
    #[must_use]
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = Some(coverage);
        self
    }

    /// Add a file, replacing any with the same name
    #[must_use]
    pub fn with_file(mut self, file: File) -> Self {
        upsert(&mut self.files, file);
        self
    }

    /// Add a suite, replacing any with the same name
    #[must_use]
    pub fn with_suite(mut self, suite: Suite) -> Self {
        upsert(&mut self.suites, suite);
        self
    }

    /// Module name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module coverage, if measured
    #[must_use]
    pub const fn coverage(&self) -> Option<&Coverage> {
        self.coverage.as_ref()
    }

    /// Files in ingestion order
    #[must_use]
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// Suites in ingestion order
    #[must_use]
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }
}

/// Root of a test report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coverage: Option<Coverage>,
    #[serde(default, deserialize_with = "unique_by_name")]
    modules: Vec<Module>,
}

impl Report {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set overall coverage
    #[must_use]
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = Some(coverage);
        self
    }

    /// Add a module, replacing any with the same name
    #[must_use]
    pub fn with_module(mut self, module: Module) -> Self {
        upsert(&mut self.modules, module);
        self
    }

    /// Overall coverage, if measured
    #[must_use]
    pub const fn coverage(&self) -> Option<&Coverage> {
        self.coverage.as_ref()
    }

    /// Modules in ingestion order
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Load a report from its JSON form, validating every invariant
    pub fn from_json(json: &str) -> ReportResult<Self> {
        serde_json::from_str(json).map_err(|e| ReportError::decoding(e.to_string()))
    }

    /// Serialize the report to its JSON form
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Entities kept in name-keyed sets
trait SetMember: Named {
    const KIND: &'static str;
}

macro_rules! named_set_member {
    ($ty:ty, $kind:literal) => {
        impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }
        }

        impl SetMember for $ty {
            const KIND: &'static str = $kind;
        }
    };
}

named_set_member!(File, "file");
named_set_member!(Suite, "suite");
named_set_member!(Module, "module");

impl SetMember for RepeatableTest {
    const KIND: &'static str = "test";
}

fn upsert<T: Named>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.name() == item.name()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

fn ensure_unique<T: SetMember>(items: &[T]) -> ReportResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.name()) {
            return Err(ReportError::duplicate(T::KIND, item.name()));
        }
    }
    Ok(())
}

fn unique_by_name<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + SetMember,
{
    let items = Vec::<T>::deserialize(deserializer)?;
    ensure_unique(&items).map_err(<D::Error as serde::de::Error>::custom)?;
    Ok(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_report() -> Report {
        Report::new()
            .with_coverage(Coverage::new(50, 200).unwrap())
            .with_module(
                Module::new("App")
                    .with_file(
                        File::new("Login.swift")
                            .with_coverage(Coverage::new(10, 20).unwrap())
                            .with_issue(Issue::warning("unused variable 'x'")),
                    )
                    .with_suite(Suite::new("LoginTests").with_test(RepeatableTest::single(
                        TestExecution::passed("testLogin", Duration::from_millis(15)),
                    ))),
            )
    }

    mod issue_tests {
        use super::*;

        #[test]
        fn test_issue_type_identifiers() {
            assert_eq!(IssueType::Warning.as_str(), "warning");
            assert_eq!(IssueType::Note.to_string(), "note");
            assert_eq!("note".parse::<IssueType>().unwrap(), IssueType::Note);
            assert!("error".parse::<IssueType>().is_err());
        }

        #[test]
        fn test_issue_serializes_type_key() {
            let value = serde_json::to_value(Issue::note("hello")).unwrap();
            assert_eq!(value["type"], "note");
            assert_eq!(value["message"], "hello");
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_upsert_replaces_same_name() {
            let module = Module::new("App")
                .with_suite(Suite::new("S"))
                .with_suite(
                    Suite::new("S").with_test(RepeatableTest::single(TestExecution::skipped("t"))),
                );
            assert_eq!(module.suites().len(), 1);
            assert_eq!(module.suites()[0].repeatable_tests().len(), 1);
        }

        #[test]
        fn test_children_keep_ingestion_order() {
            let report = Report::new()
                .with_module(Module::new("b"))
                .with_module(Module::new("a"));
            let names: Vec<&str> = report.modules().iter().map(Module::name).collect();
            assert_eq!(names, vec!["b", "a"]);
        }
    }

    mod json_tests {
        use super::*;

        #[test]
        fn test_json_round_trip() {
            let report = sample_report();
            let json = report.to_json().unwrap();
            let loaded = Report::from_json(&json).unwrap();
            assert_eq!(loaded, report);
        }

        #[test]
        fn test_minimal_document() {
            let report = Report::from_json("{}").unwrap();
            assert!(report.coverage().is_none());
            assert!(report.modules().is_empty());
        }

        #[test]
        fn test_duplicate_module_rejected() {
            let json = r#"{"modules":[{"name":"App"},{"name":"App"}]}"#;
            let err = Report::from_json(json).unwrap_err();
            assert!(err.to_string().contains("Duplicate module name: App"));
        }

        #[test]
        fn test_duplicate_test_rejected() {
            let json = r#"{"modules":[{"name":"App","suites":[{"name":"S","repeatableTests":[
                {"name":"t","executions":[{"name":"t","status":"passed","durationMs":1.0}]},
                {"name":"t","executions":[{"name":"t","status":"failed","durationMs":2.0}]}
            ]}]}]}"#;
            let err = Report::from_json(json).unwrap_err();
            assert!(err.to_string().contains("Duplicate test name: t"));
        }

        #[test]
        fn test_invalid_coverage_rejected() {
            let json = r#"{"coverage":{"coveredLines":9,"totalLines":3}}"#;
            assert!(Report::from_json(json).is_err());
        }
    }
}
