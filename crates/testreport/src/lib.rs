//! testreport: Reconcile and Render Test Execution Reports
//!
//! Turns a hierarchical test report (modules, suites, tests, coverage and
//! file diagnostics) into one canonical JSON document for CI systems and
//! dashboards.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    RENDER PIPELINE                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Report     │    │ Status     │    │ Merge      │            │
//! │   │ (read-only)│───►│ pre-filter │───►│ per device │───┐        │
//! │   └────────────┘    └────────────┘    └────────────┘   │        │
//! │                                                        ▼        │
//! │                     ┌────────────┐    ┌────────────┐            │
//! │                     │ Sorted     │◄───│ Status     │            │
//! │                     │ JSON text  │    │ post-filter│            │
//! │                     └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use testreport::{render, Module, RenderOptions, RepeatableTest, Report, Suite, TestExecution};
//!
//! let report = Report::new().with_module(
//!     Module::new("App").with_suite(
//!         Suite::new("LoginTests").with_test(RepeatableTest::single(TestExecution::passed(
//!             "testLogin",
//!             Duration::from_millis(900),
//!         ))),
//!     ),
//! );
//!
//! let json = render(&report, &RenderOptions::default()).unwrap();
//! assert!(json.contains("\"status\": \"passed\""));
//! ```

#![warn(missing_docs)]

pub mod formatters;
pub mod ordering;
pub mod report;
mod result;

pub use formatters::{render, Formatter, JsonFormatter, RenderOptions};
pub use report::{
    filter_by_status, Coverage, Device, File, Issue, IssueType, Module, RepeatableTest, Report,
    Suite, TestExecution, TestStatus,
};
pub use result::{ReportError, ReportResult};
