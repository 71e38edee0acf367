//! @ai:module:intent Reporting sinks receiving run lifecycle events
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportingSink, RunEvent, ConsoleSink, JsonLinesSink, RecordingSink, FanoutSink

pub mod console;
pub mod jsonl;
pub mod recording;

pub use console::ConsoleSink;
pub use jsonl::JsonLinesSink;
pub use recording::RecordingSink;

use crate::error::{HarnessError, Phase};
use crate::report::{RunReport, TimingRecord};
use serde::{Deserialize, Serialize};

/// @ai:intent Discrete event emitted by the execution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    RunStarted {
        subject: String,
    },
    PlanReady {
        subject: String,
        benchmarks: Vec<String>,
    },
    /// Emitted right before an operation is called; iteration is set for benchmarks
    OperationInvoked {
        subject: String,
        phase: Phase,
        operation: String,
        iteration: Option<u32>,
    },
    IterationTimed {
        subject: String,
        operation: String,
        iteration: u32,
        elapsed_ms: u64,
    },
    BenchmarkCompleted {
        subject: String,
        record: TimingRecord,
    },
    /// The failing iteration is not part of the record
    BenchmarkAborted {
        subject: String,
        record: TimingRecord,
        iteration: u32,
    },
    RunFinished {
        report: RunReport,
    },
    /// The run never started: instantiation or configuration failed
    RunRejected {
        subject: String,
        error: HarnessError,
    },
}

impl RunEvent {
    /// @ai:intent Subject the event belongs to
    /// @ai:effects pure
    pub fn subject(&self) -> &str {
        match self {
            RunEvent::RunStarted { subject }
            | RunEvent::PlanReady { subject, .. }
            | RunEvent::OperationInvoked { subject, .. }
            | RunEvent::IterationTimed { subject, .. }
            | RunEvent::BenchmarkCompleted { subject, .. }
            | RunEvent::BenchmarkAborted { subject, .. }
            | RunEvent::RunRejected { subject, .. } => subject,
            RunEvent::RunFinished { report } => &report.subject,
        }
    }
}

/// @ai:intent Destination-agnostic receiver of run events
/// @ai:invariant emit never fails the run; sinks handle their own I/O errors
pub trait ReportingSink {
    /// @ai:intent Accept one event
    fn emit(&mut self, event: &RunEvent);
}

impl<T: ReportingSink + ?Sized> ReportingSink for &mut T {
    fn emit(&mut self, event: &RunEvent) {
        (**self).emit(event)
    }
}

impl<T: ReportingSink + ?Sized> ReportingSink for Box<T> {
    fn emit(&mut self, event: &RunEvent) {
        (**self).emit(event)
    }
}

/// @ai:intent Forwards every event to each inner sink in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn ReportingSink>>,
}

impl FanoutSink {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// @ai:effects pure
    pub fn with(mut self, sink: impl ReportingSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ReportingSink for FanoutSink {
    fn emit(&mut self, event: &RunEvent) {
        for sink in &mut self.sinks {
            sink.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Shared(Rc<RefCell<Vec<String>>>);

    impl ReportingSink for Shared {
        fn emit(&mut self, event: &RunEvent) {
            self.0.borrow_mut().push(event.subject().to_string());
        }
    }

    #[test]
    fn test_fanout_forwards_to_every_sink() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut fanout = FanoutSink::new()
            .with(Shared(Rc::clone(&seen)))
            .with(Shared(Rc::clone(&seen)));

        fanout.emit(&RunEvent::RunStarted {
            subject: "Neo4jBenchmark".to_string(),
        });

        assert_eq!(fanout.len(), 2);
        assert_eq!(*seen.borrow(), vec!["Neo4jBenchmark", "Neo4jBenchmark"]);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = RunEvent::IterationTimed {
            subject: "S".to_string(),
            operation: "op".to_string(),
            iteration: 1,
            elapsed_ms: 4,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.starts_with(r#"{"event":"iteration_timed""#));
    }
}
