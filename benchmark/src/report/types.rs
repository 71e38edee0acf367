//! @ai:module:intent Result types produced by a benchmark run
//! @ai:module:layer domain
//! @ai:module:public_api RunReport, TimingRecord, RunStatus, SessionReport, SuiteOutcome
//! @ai:module:stateless true

use crate::error::{HarnessError, Phase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// @ai:intent Elapsed durations of one benchmark operation, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub operation: String,
    pub priority: i32,
    /// Iterations the operation declared
    pub iteration_count: u32,
    /// One entry per executed iteration, millisecond resolution
    pub durations_ms: Vec<u64>,
}

impl TimingRecord {
    /// @ai:effects pure
    pub fn new(operation: impl Into<String>, priority: i32, iteration_count: u32) -> Self {
        Self {
            operation: operation.into(),
            priority,
            iteration_count,
            durations_ms: Vec::with_capacity(iteration_count as usize),
        }
    }

    /// @ai:intent Append the elapsed time of one iteration
    /// @ai:effects state:write
    pub fn push(&mut self, elapsed: Duration) {
        self.durations_ms.push(as_millis(elapsed));
    }

    pub fn executed_iterations(&self) -> usize {
        self.durations_ms.len()
    }

    /// @ai:intent Whether every declared iteration was timed
    /// @ai:effects pure
    pub fn is_complete(&self) -> bool {
        self.durations_ms.len() == self.iteration_count as usize
    }

    pub fn total_ms(&self) -> u64 {
        self.durations_ms.iter().sum()
    }
}

/// @ai:intent Truncate a duration to whole milliseconds
/// @ai:effects pure
pub fn as_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// @ai:intent Terminal status of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    AbortedAtSetup,
    AbortedAtBenchmark { operation: String, iteration: u32 },
}

impl RunStatus {
    /// @ai:intent Short human-readable label
    /// @ai:effects pure
    pub fn label(&self) -> String {
        match self {
            RunStatus::Completed => "completed".to_string(),
            RunStatus::AbortedAtSetup => "aborted at setup".to_string(),
            RunStatus::AbortedAtBenchmark {
                operation,
                iteration,
            } => format!("aborted at {} (iteration {})", operation, iteration),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// @ai:intent Complete outcome of one subject run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub subject: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
    /// Benchmark names in planned execution order
    pub plan: Vec<String>,
    /// Records of every benchmark that started, in execution order
    pub records: Vec<TimingRecord>,
    /// Failures in the order they occurred; a teardown failure may follow another
    #[serde(default)]
    pub errors: Vec<HarnessError>,
}

impl RunReport {
    /// @ai:intent Start an in-progress report
    /// @ai:effects time
    pub fn begin(subject: impl Into<String>, plan: Vec<String>) -> Self {
        let now = Utc::now();

        Self {
            subject: subject.into(),
            started_at: now,
            finished_at: now,
            status: RunStatus::Completed,
            plan,
            records: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// @ai:intent Stamp the finish time
    /// @ai:effects time
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// @ai:intent Whether the run completed without any error, teardown included
    /// @ai:effects pure
    pub fn is_clean(&self) -> bool {
        self.is_completed() && self.errors.is_empty()
    }

    /// @ai:intent Find the timing record of an operation
    /// @ai:effects pure
    pub fn record(&self, operation: &str) -> Option<&TimingRecord> {
        self.records.iter().find(|r| r.operation == operation)
    }

    /// @ai:intent The error that aborted the run, if any
    /// @ai:effects pure
    pub fn abort_error(&self) -> Option<&HarnessError> {
        self.errors.iter().find(|e| e.phase() != Phase::Teardown)
    }

    pub fn teardown_error(&self) -> Option<&HarnessError> {
        self.errors.iter().find(|e| e.phase() == Phase::Teardown)
    }

    pub fn total_iterations(&self) -> usize {
        self.records.iter().map(|r| r.executed_iterations()).sum()
    }
}

/// @ai:intent Result of attempting one suite in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SuiteOutcome {
    /// The lifecycle started; the report holds its status
    Ran { suite: String, report: RunReport },
    /// Instantiation or configuration failed before anything was invoked
    Rejected { suite: String, error: HarnessError },
}

impl SuiteOutcome {
    pub fn suite(&self) -> &str {
        match self {
            SuiteOutcome::Ran { suite, .. } | SuiteOutcome::Rejected { suite, .. } => suite,
        }
    }

    pub fn report(&self) -> Option<&RunReport> {
        match self {
            SuiteOutcome::Ran { report, .. } => Some(report),
            SuiteOutcome::Rejected { .. } => None,
        }
    }

    /// @ai:intent Whether the suite ran to completion without any error
    /// @ai:effects pure
    pub fn is_success(&self) -> bool {
        self.report().map(RunReport::is_clean).unwrap_or(false)
    }
}

/// @ai:intent Every suite outcome of one CLI invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub suites: Vec<SuiteOutcome>,
}

impl SessionReport {
    /// @ai:effects time
    pub fn begin() -> Self {
        let now = Utc::now();

        Self {
            started_at: now,
            finished_at: now,
            suites: Vec::new(),
        }
    }

    /// @ai:effects time
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn reports(&self) -> impl Iterator<Item = &RunReport> {
        self.suites.iter().filter_map(SuiteOutcome::report)
    }

    pub fn all_succeeded(&self) -> bool {
        self.suites.iter().all(SuiteOutcome::is_success)
    }

    pub fn failed_count(&self) -> usize {
        self.suites.iter().filter(|s| !s.is_success()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_truncates_to_millis() {
        let mut record = TimingRecord::new("query", 0, 2);
        record.push(Duration::from_micros(1_999));
        assert!(!record.is_complete());
        record.push(Duration::from_millis(12));

        assert_eq!(record.durations_ms, vec![1, 12]);
        assert!(record.is_complete());
        assert_eq!(record.total_ms(), 13);
    }

    #[test]
    fn test_status_serializes_with_location() {
        let status = RunStatus::AbortedAtBenchmark {
            operation: "findFriends".to_string(),
            iteration: 2,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(
            json,
            r#"{"status":"aborted_at_benchmark","operation":"findFriends","iteration":2}"#
        );
        assert_eq!(status.label(), "aborted at findFriends (iteration 2)");
    }

    #[test]
    fn test_abort_and_teardown_errors_are_separated() {
        let mut report = RunReport::begin("Subject", vec!["a".to_string()]);
        report.status = RunStatus::AbortedAtSetup;
        report.errors.push(HarnessError::Setup {
            operation: "setup".to_string(),
            message: "refused".to_string(),
        });

        assert!(!report.is_completed());
        assert_eq!(report.abort_error().unwrap().phase(), Phase::Setup);
        assert!(report.teardown_error().is_none());
    }

    #[test]
    fn test_session_success_requires_clean_reports() {
        let mut session = SessionReport::begin();
        session.suites.push(SuiteOutcome::Ran {
            suite: "social-graph".to_string(),
            report: RunReport::begin("SocialGraphBenchmark", vec![]),
        });
        assert!(session.all_succeeded());

        session.suites.push(SuiteOutcome::Rejected {
            suite: "broken".to_string(),
            error: HarnessError::Instantiation {
                subject: "Broken".to_string(),
                message: "no driver".to_string(),
            },
        });

        assert!(!session.all_succeeded());
        assert_eq!(session.failed_count(), 1);
        assert_eq!(session.reports().count(), 1);
        assert_eq!(session.suites[1].suite(), "broken");
    }
}
