//! @ai:module:intent Log run events through tracing
//! @ai:module:layer infrastructure
//! @ai:module:public_api ConsoleSink
//! @ai:module:stateless true

use crate::error::Phase;
use crate::sink::{ReportingSink, RunEvent};

/// @ai:intent Writes human-readable lifecycle lines to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl ReportingSink for ConsoleSink {
    /// @ai:effects io
    fn emit(&mut self, event: &RunEvent) {
        match event {
            RunEvent::RunStarted { subject } => {
                tracing::info!("{}: Benchmark started.", subject);
            }
            RunEvent::PlanReady {
                subject,
                benchmarks,
            } => {
                tracing::debug!("{}: Execution plan {:?}", subject, benchmarks);
            }
            RunEvent::OperationInvoked {
                phase, operation, ..
            } => match phase {
                Phase::Setup => tracing::info!("Invoking setup method: {}", operation),
                Phase::Teardown => tracing::info!("Invoking tear down method: {}", operation),
                _ => tracing::trace!("Invoking benchmark method: {}", operation),
            },
            RunEvent::IterationTimed {
                operation,
                iteration,
                elapsed_ms,
                ..
            } => {
                tracing::debug!("{}: iteration {} took {}ms", operation, iteration, elapsed_ms);
            }
            RunEvent::BenchmarkCompleted { record, .. } => {
                tracing::info!(
                    "{}: Execution times - {:?}",
                    record.operation,
                    record.durations_ms
                );
            }
            RunEvent::BenchmarkAborted { record, iteration, .. } => {
                tracing::warn!(
                    "{}: Execution times - {:?} (failed on iteration {} of {})",
                    record.operation,
                    record.durations_ms,
                    iteration,
                    record.iteration_count
                );
            }
            RunEvent::RunFinished { report } => {
                for error in &report.errors {
                    tracing::error!("{}: {}", report.subject, error);
                }

                if report.is_completed() {
                    tracing::info!("{}: Benchmark finished.", report.subject);
                } else {
                    tracing::warn!("{}: Benchmark {}.", report.subject, report.status);
                }
            }
            RunEvent::RunRejected { subject, error } => {
                tracing::error!("{}: Failed to run benchmark test. {}", subject, error);
            }
        }
    }
}
