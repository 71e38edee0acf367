//! @ai:module:intent In-memory sink for tests and diagnostics
//! @ai:module:layer infrastructure
//! @ai:module:public_api RecordingSink
//! @ai:module:stateless false

use crate::error::Phase;
use crate::sink::{ReportingSink, RunEvent};

/// @ai:intent Keeps every emitted event in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<RunEvent>,
}

impl RecordingSink {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// @ai:intent Operation names in invocation order, one entry per call
    /// @ai:effects pure
    pub fn invocations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RunEvent::OperationInvoked { operation, .. } => Some(operation.as_str()),
                _ => None,
            })
            .collect()
    }

    /// @ai:intent Number of calls made to one operation
    /// @ai:effects pure
    pub fn invocation_count(&self, operation: &str) -> usize {
        self.invocations().iter().filter(|o| **o == operation).count()
    }

    /// @ai:intent Number of calls made during one phase
    /// @ai:effects pure
    pub fn phase_count(&self, phase: Phase) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RunEvent::OperationInvoked { phase: p, .. } if *p == phase))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ReportingSink for RecordingSink {
    fn emit(&mut self, event: &RunEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoked(phase: Phase, operation: &str) -> RunEvent {
        RunEvent::OperationInvoked {
            subject: "S".to_string(),
            phase,
            operation: operation.to_string(),
            iteration: None,
        }
    }

    #[test]
    fn test_counts_invocations() {
        let mut sink = RecordingSink::new();
        sink.emit(&invoked(Phase::Setup, "setup"));
        sink.emit(&invoked(Phase::Benchmark, "query"));
        sink.emit(&invoked(Phase::Benchmark, "query"));

        assert_eq!(sink.invocations(), vec!["setup", "query", "query"]);
        assert_eq!(sink.invocation_count("query"), 2);
        assert_eq!(sink.phase_count(Phase::Setup), 1);

        sink.clear();
        assert!(sink.events().is_empty());
    }
}
