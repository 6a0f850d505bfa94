//! Single test executions and their outcome categories

use crate::result::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Outcome of one test execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test was skipped
    Skipped,
    /// Test failed in a way it was declared to
    ExpectedFailure,
    /// Outcome could not be determined
    Unknown,
}

impl TestStatus {
    /// Every known status
    pub const ALL: [Self; 5] = [
        Self::Passed,
        Self::Failed,
        Self::Skipped,
        Self::ExpectedFailure,
        Self::Unknown,
    ];

    /// Stable identifier used in rendered output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::ExpectedFailure => "expectedFailure",
            Self::Unknown => "unknown",
        }
    }

    /// Check if status is a genuine failure
    ///
    /// Expected failures do not count.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = ReportError;

    fn from_str(s: &str) -> ReportResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ReportError::unknown_status(s))
    }
}

/// Target a test execution ran on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    /// Stable device identifier (e.g. a UDID)
    pub identifier: String,
    /// Human-readable device name
    pub name: String,
}

impl Device {
    /// Create a device identity
    #[must_use]
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

/// One concrete run of a test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestExecution {
    /// Test name
    pub name: String,
    /// Outcome
    pub status: TestStatus,
    /// Wall-clock duration
    #[serde(rename = "durationMs", with = "duration_ms")]
    pub duration: Duration,
    /// Failure or skip message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Device the execution ran on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
}

impl TestExecution {
    /// Create an execution with no message or device
    #[must_use]
    pub fn new(name: impl Into<String>, status: TestStatus, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status,
            duration,
            message: None,
            device: None,
        }
    }

    /// Create a passing execution
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self::new(name, TestStatus::Passed, duration)
    }

    /// Create a failing execution
    #[must_use]
    pub fn failed(name: impl Into<String>, duration: Duration, message: impl Into<String>) -> Self {
        Self::new(name, TestStatus::Failed, duration).with_message(message)
    }

    /// Create a skipped execution
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self::new(name, TestStatus::Skipped, Duration::ZERO)
    }

    /// Attach a message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the device the execution ran on
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    /// Duration in fractional milliseconds
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        duration_ms::to_millis(self.duration)
    }
}

/// Durations travel as fractional milliseconds.
mod duration_ms {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Whole-millisecond durations convert exactly.
    pub fn to_millis(duration: Duration) -> f64 {
        duration.as_nanos() as f64 / 1_000_000.0
    }

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(to_millis(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        if !ms.is_finite() || ms < 0.0 {
            return Err(D::Error::custom(format!("invalid duration: {ms}ms")));
        }
        let nanos = (ms * 1_000_000.0).round();
        // 2^64 is exactly representable, so anything below it fits a u64.
        if nanos >= u64::MAX as f64 {
            return Err(D::Error::custom(format!("duration out of range: {ms}ms")));
        }
        Ok(Duration::from_nanos(nanos as u64))
    }
}
