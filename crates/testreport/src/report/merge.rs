//! Repeatable tests: retries and per-device runs of one logical test
//!
//! Two independent policies reduce raw executions to reported rows:
//!
//! - **Status pre-filter** ([`filter_by_status`]) drops whole repeatable
//!   tests that have no execution in the allowed set.
//! - **Merge** ([`RepeatableTest::merged_executions`]) either keeps every
//!   execution (device detail) or collapses device-agnostic groups to a
//!   single representative, preferring a failure.

use super::execution::{TestExecution, TestStatus};
use crate::ordering::Named;
use crate::result::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A logical test with one or more recorded executions.
///
/// Executions are kept in ingestion order and all share the test's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RepeatableTestRepr")]
pub struct RepeatableTest {
    name: String,
    executions: Vec<TestExecution>,
}

#[derive(Deserialize)]
struct RepeatableTestRepr {
    name: String,
    executions: Vec<TestExecution>,
}

impl TryFrom<RepeatableTestRepr> for RepeatableTest {
    type Error = ReportError;

    fn try_from(repr: RepeatableTestRepr) -> ReportResult<Self> {
        Self::try_new(repr.name, repr.executions)
    }
}

impl RepeatableTest {
    /// Create a repeatable test from its executions.
    ///
    /// # Panics
    ///
    /// Panics if `executions` is empty or any execution carries a different
    /// name. Both are ingestion bugs, not runtime conditions.
    #[must_use]
    pub fn new(name: impl Into<String>, executions: Vec<TestExecution>) -> Self {
        match Self::try_new(name, executions) {
            Ok(test) => test,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a repeatable test, reporting invariant violations as errors
    pub fn try_new(name: impl Into<String>, executions: Vec<TestExecution>) -> ReportResult<Self> {
        let name = name.into();
        if executions.is_empty() {
            return Err(ReportError::EmptyRepeatableTest { name });
        }
        if let Some(stray) = executions.iter().find(|e| e.name != name) {
            return Err(ReportError::MismatchedExecution {
                expected: name,
                found: stray.name.clone(),
            });
        }
        Ok(Self { name, executions })
    }

    /// Create a repeatable test with a single execution
    #[must_use]
    pub fn single(execution: TestExecution) -> Self {
        Self {
            name: execution.name.clone(),
            executions: vec![execution],
        }
    }

    /// Test name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All recorded executions in ingestion order
    #[must_use]
    pub fn executions(&self) -> &[TestExecution] {
        &self.executions
    }

    /// Check if any execution has one of the given statuses
    #[must_use]
    pub fn has_any_status(&self, include: &BTreeSet<TestStatus>) -> bool {
        self.executions.iter().any(|e| include.contains(&e.status))
    }

    /// Executions to report for this test.
    ///
    /// With `filter_device` false every execution is returned unchanged.
    /// Otherwise executions that differ only by device are collapsed to one
    /// representative per group: the first failure if any member failed,
    /// else the first member. The representative keeps its own duration
    /// and message.
    #[must_use]
    pub fn merged_executions(&self, filter_device: bool) -> Vec<&TestExecution> {
        if !filter_device || self.executions.len() == 1 {
            return self.executions.iter().collect();
        }

        device_agnostic_groups(&self.executions)
            .into_iter()
            .map(|group| {
                let representative = representative(&group);
                if group.len() > 1 {
                    tracing::trace!(
                        test = %self.name,
                        executions = group.len(),
                        status = %representative.status,
                        "collapsed device executions"
                    );
                }
                representative
            })
            .collect()
    }
}

impl Named for RepeatableTest {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Keep repeatable tests with at least one execution in `include`.
///
/// The status set only has to outlive the iteration, not the yielded tests.
pub fn filter_by_status<'a, 'b, I>(
    tests: I,
    include: &'b BTreeSet<TestStatus>,
) -> impl Iterator<Item = &'a RepeatableTest> + 'b
where
    'a: 'b,
    I: IntoIterator<Item = &'a RepeatableTest>,
    I::IntoIter: 'b,
{
    tests.into_iter().filter(move |test| test.has_any_status(include))
}

/// Identity of an execution once its device is stripped.
fn device_agnostic_key(execution: &TestExecution) -> &str {
    &execution.name
}

/// Group executions by device-agnostic identity, in first-seen order.
fn device_agnostic_groups(executions: &[TestExecution]) -> Vec<Vec<&TestExecution>> {
    let mut groups: Vec<(&str, Vec<&TestExecution>)> = Vec::new();
    for execution in executions {
        let key = device_agnostic_key(execution);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(execution),
            None => groups.push((key, vec![execution])),
        }
    }
    groups.into_iter().map(|(_, members)| members).collect()
}

/// First failing member, else the first member. Groups are never empty.
fn representative<'a>(group: &[&'a TestExecution]) -> &'a TestExecution {
    group
        .iter()
        .copied()
        .find(|e| e.status.is_failure())
        .unwrap_or(group[0])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::report::execution::Device;
    use std::time::Duration;

    fn on(device: &str, execution: TestExecution) -> TestExecution {
        execution.with_device(Device::new(device, device))
    }

    fn statuses(statuses: &[TestStatus]) -> BTreeSet<TestStatus> {
        statuses.iter().copied().collect()
    }

    fn flaky_login() -> RepeatableTest {
        RepeatableTest::new(
            "testLogin",
            vec![
                on(
                    "A",
                    TestExecution::failed(
                        "testLogin",
                        Duration::from_millis(1200),
                        "assertion failed",
                    ),
                ),
                on("B", TestExecution::passed("testLogin", Duration::from_millis(900))),
            ],
        )
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_try_new_rejects_empty() {
            let err = RepeatableTest::try_new("t", Vec::new()).unwrap_err();
            assert!(matches!(err, ReportError::EmptyRepeatableTest { .. }));
        }

        #[test]
        fn test_try_new_rejects_mismatched_name() {
            let err = RepeatableTest::try_new(
                "a",
                vec![TestExecution::passed("b", Duration::ZERO)],
            )
            .unwrap_err();
            assert!(matches!(err, ReportError::MismatchedExecution { .. }));
        }

        #[test]
        #[should_panic(expected = "has no executions")]
        fn test_new_panics_on_empty() {
            let _ = RepeatableTest::new("t", Vec::new());
        }

        #[test]
        fn test_deserialize_rejects_empty() {
            let json = r#"{"name":"t","executions":[]}"#;
            assert!(serde_json::from_str::<RepeatableTest>(json).is_err());
        }
    }

    mod filter_tests {
        use super::*;

        #[test]
        fn test_kept_when_any_execution_matches() {
            let test = flaky_login();
            assert!(test.has_any_status(&statuses(&[TestStatus::Passed])));
            assert!(test.has_any_status(&statuses(&[TestStatus::Failed])));
            assert!(!test.has_any_status(&statuses(&[TestStatus::Skipped])));
        }

        #[test]
        fn test_empty_include_drops_everything() {
            let tests = vec![flaky_login()];
            let include = BTreeSet::new();
            assert_eq!(filter_by_status(&tests, &include).count(), 0);
        }

        #[test]
        fn test_filter_preserves_order() {
            let tests = vec![
                RepeatableTest::single(TestExecution::passed("b", Duration::ZERO)),
                RepeatableTest::single(TestExecution::skipped("c")),
                RepeatableTest::single(TestExecution::passed("a", Duration::ZERO)),
            ];
            let include = statuses(&[TestStatus::Passed]);
            let names: Vec<&str> = filter_by_status(&tests, &include).map(|t| t.name()).collect();
            assert_eq!(names, vec!["b", "a"]);
        }

        #[test]
        fn test_kept_tests_outlive_status_set() {
            let tests = vec![
                flaky_login(),
                RepeatableTest::single(TestExecution::skipped("testLogout")),
            ];
            let kept: Vec<&RepeatableTest> = {
                let include = statuses(&[TestStatus::Skipped]);
                filter_by_status(&tests, &include).collect()
            };
            assert_eq!(kept.len(), 1);
            assert_eq!(kept[0].name(), "testLogout");
        }
    }

    mod merge_tests {
        use super::*;

        #[test]
        fn test_failure_wins_collapse() {
            let test = flaky_login();
            let merged = test.merged_executions(true);
            assert_eq!(merged.len(), 1);
            assert_eq!(merged[0].status, TestStatus::Failed);
            assert_eq!(merged[0].duration, Duration::from_millis(1200));
            assert_eq!(merged[0].message.as_deref(), Some("assertion failed"));
        }

        #[test]
        fn test_failure_wins_regardless_of_position() {
            let test = RepeatableTest::new(
                "t",
                vec![
                    on("A", TestExecution::passed("t", Duration::from_millis(10))),
                    on("B", TestExecution::passed("t", Duration::from_millis(20))),
                    on("C", TestExecution::failed("t", Duration::from_millis(30), "x")),
                ],
            );
            let merged = test.merged_executions(true);
            assert_eq!(merged.len(), 1);
            assert_eq!(merged[0].duration, Duration::from_millis(30));
        }

        #[test]
        fn test_first_taken_without_failures() {
            let test = RepeatableTest::new(
                "t",
                vec![
                    on("A", TestExecution::skipped("t")),
                    on("B", TestExecution::passed("t", Duration::from_millis(5))),
                ],
            );
            let merged = test.merged_executions(true);
            assert_eq!(merged.len(), 1);
            assert_eq!(merged[0].status, TestStatus::Skipped);
        }

        #[test]
        fn test_expected_failure_is_not_preferred() {
            let test = RepeatableTest::new(
                "t",
                vec![
                    TestExecution::passed("t", Duration::ZERO),
                    TestExecution::new("t", TestStatus::ExpectedFailure, Duration::ZERO),
                ],
            );
            assert_eq!(test.merged_executions(true)[0].status, TestStatus::Passed);
        }

        #[test]
        fn test_device_detail_keeps_every_execution() {
            let test = flaky_login();
            let merged = test.merged_executions(false);
            assert_eq!(merged.len(), 2);
            assert_eq!(merged[0].status, TestStatus::Failed);
            assert_eq!(merged[1].status, TestStatus::Passed);
            assert_eq!(merged[1].device.as_ref().unwrap().identifier, "B");
        }

        #[test]
        fn test_single_execution_unaffected() {
            let test = RepeatableTest::single(TestExecution::passed("t", Duration::from_millis(7)));
            assert_eq!(test.merged_executions(true), test.merged_executions(false));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn status_strategy() -> impl Strategy<Value = TestStatus> {
            prop::sample::select(TestStatus::ALL.to_vec())
        }

        fn repeatable_strategy() -> impl Strategy<Value = RepeatableTest> {
            prop::collection::vec((status_strategy(), 0u64..5000), 1..8).prop_map(|runs| {
                let executions = runs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (status, ms))| {
                        TestExecution::new("t", status, Duration::from_millis(ms))
                            .with_device(Device::new(format!("dev-{i}"), format!("Device {i}")))
                    })
                    .collect();
                RepeatableTest::new("t", executions)
            })
        }

        proptest! {
            #[test]
            fn prop_collapse_yields_one_row(test in repeatable_strategy()) {
                let merged = test.merged_executions(true);
                prop_assert_eq!(merged.len(), 1);
                let any_failed = test.executions().iter().any(|e| e.status.is_failure());
                prop_assert_eq!(merged[0].status.is_failure(), any_failed);
            }

            #[test]
            fn prop_fan_out_is_identity(test in repeatable_strategy()) {
                let merged = test.merged_executions(false);
                let all: Vec<&TestExecution> = test.executions().iter().collect();
                prop_assert_eq!(merged, all);
            }

            #[test]
            fn prop_representative_is_a_member(test in repeatable_strategy()) {
                let merged = test.merged_executions(true);
                prop_assert!(test.executions().iter().any(|e| std::ptr::eq(e, merged[0])));
            }
        }
    }
}
