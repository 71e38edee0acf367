//! @ai:module:intent Run one subject through setup, timed benchmarks and teardown
//! @ai:module:layer application
//! @ai:module:public_api ExecutionEngine
//! @ai:module:stateless false
//!
//! Execution is strictly sequential: one operation, one iteration at a time,
//! on the calling thread. The subject instance is owned by the engine for the
//! whole run and dropped when the run ends.

use crate::error::{HarnessError, Phase, Result};
use crate::lifecycle::{self, BenchmarkDescriptor, LifecycleMethod};
use crate::report::{as_millis, RunReport, RunStatus, TimingRecord};
use crate::sink::{ReportingSink, RunEvent};
use crate::subject::{BenchmarkSubject, Operation, OperationTable};
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// @ai:intent Outcome of timing one benchmark
enum BenchmarkPhase {
    Completed,
    Aborted { iteration: u32, error: HarnessError },
}

/// @ai:intent Orchestrates runs and reports them to an injected sink
pub struct ExecutionEngine<K: ReportingSink> {
    sink: K,
}

impl<K: ReportingSink> ExecutionEngine<K> {
    /// @ai:intent Create an engine reporting to the given sink
    /// @ai:effects pure
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// @ai:intent Run the full lifecycle of a fresh subject instance
    /// @ai:post Err only for instantiation or configuration failures; later failures land in the report
    /// @ai:effects subject-defined, time
    pub fn run<S: BenchmarkSubject>(&mut self) -> Result<RunReport> {
        let subject_name = S::subject_name();

        self.sink.emit(&RunEvent::RunStarted {
            subject: subject_name.clone(),
        });

        let mut instance = match guarded(|| S::instantiate().map_err(|e| format!("{:#}", e))) {
            Ok(instance) => instance,
            Err(message) => {
                return Err(self.reject(
                    &subject_name,
                    HarnessError::Instantiation {
                        subject: subject_name.clone(),
                        message,
                    },
                ))
            }
        };

        let table = match guarded(|| Ok(S::operations())) {
            Ok(table) => table,
            Err(message) => {
                return Err(self.reject(
                    &subject_name,
                    HarnessError::configuration(&subject_name, message),
                ))
            }
        };

        let prepared = match lifecycle::prepare(&subject_name, &table) {
            Ok(prepared) => prepared,
            Err(e) => return Err(self.reject(&subject_name, e)),
        };

        let plan_names: Vec<String> = prepared.plan.iter().map(|b| b.name.clone()).collect();

        self.sink.emit(&RunEvent::PlanReady {
            subject: subject_name.clone(),
            benchmarks: plan_names.clone(),
        });

        let mut report = RunReport::begin(subject_name.clone(), plan_names);

        if let Some(ref setup) = prepared.setup {
            if let Err(e) = self.invoke_lifecycle(&subject_name, &table, &mut instance, setup, Phase::Setup)
            {
                report.status = RunStatus::AbortedAtSetup;
                report.errors.push(e);
                return Ok(self.finish(report));
            }
        }

        for benchmark in &prepared.plan {
            match self.run_benchmark(&subject_name, &table, &mut instance, benchmark, &mut report) {
                BenchmarkPhase::Completed => {}
                BenchmarkPhase::Aborted { iteration, error } => {
                    report.status = RunStatus::AbortedAtBenchmark {
                        operation: benchmark.name.clone(),
                        iteration,
                    };
                    report.errors.push(error);
                    break;
                }
            }
        }

        if let Some(ref teardown) = prepared.teardown {
            if let Err(e) =
                self.invoke_lifecycle(&subject_name, &table, &mut instance, teardown, Phase::Teardown)
            {
                report.errors.push(e);
            }
        }

        Ok(self.finish(report))
    }

    /// @ai:intent Time every iteration of one benchmark, stopping at the first failure
    /// @ai:effects subject-defined, time
    fn run_benchmark<S>(
        &mut self,
        subject_name: &str,
        table: &OperationTable<S>,
        instance: &mut S,
        benchmark: &BenchmarkDescriptor,
        report: &mut RunReport,
    ) -> BenchmarkPhase {
        let mut record = TimingRecord::new(
            benchmark.name.clone(),
            benchmark.priority,
            benchmark.iteration_count,
        );

        let operation = table.at(benchmark.index);

        for iteration in 1..=benchmark.iteration_count {
            self.sink.emit(&RunEvent::OperationInvoked {
                subject: subject_name.to_string(),
                phase: Phase::Benchmark,
                operation: benchmark.name.clone(),
                iteration: Some(iteration),
            });

            let start = Instant::now();
            let outcome = call(operation, instance);
            let elapsed = start.elapsed();

            if let Err(message) = outcome {
                self.sink.emit(&RunEvent::BenchmarkAborted {
                    subject: subject_name.to_string(),
                    record: record.clone(),
                    iteration,
                });
                report.records.push(record);
                return BenchmarkPhase::Aborted {
                    iteration,
                    error: HarnessError::BenchmarkExecution {
                        operation: benchmark.name.clone(),
                        iteration,
                        message,
                    },
                };
            }

            record.push(elapsed);

            self.sink.emit(&RunEvent::IterationTimed {
                subject: subject_name.to_string(),
                operation: benchmark.name.clone(),
                iteration,
                elapsed_ms: as_millis(elapsed),
            });
        }

        self.sink.emit(&RunEvent::BenchmarkCompleted {
            subject: subject_name.to_string(),
            record: record.clone(),
        });
        report.records.push(record);

        BenchmarkPhase::Completed
    }

    /// @ai:intent Invoke the single setup or teardown method once
    /// @ai:pre phase is Setup or Teardown
    /// @ai:effects subject-defined
    fn invoke_lifecycle<S>(
        &mut self,
        subject_name: &str,
        table: &OperationTable<S>,
        instance: &mut S,
        method: &LifecycleMethod,
        phase: Phase,
    ) -> Result<()> {
        let operation = table.at(method.index);

        self.sink.emit(&RunEvent::OperationInvoked {
            subject: subject_name.to_string(),
            phase,
            operation: method.name.clone(),
            iteration: None,
        });

        call(operation, instance).map_err(|message| {
            let operation = method.name.clone();

            if phase == Phase::Setup {
                HarnessError::Setup { operation, message }
            } else {
                HarnessError::Teardown { operation, message }
            }
        })
    }

    fn reject(&mut self, subject_name: &str, error: HarnessError) -> HarnessError {
        self.sink.emit(&RunEvent::RunRejected {
            subject: subject_name.to_string(),
            error: error.clone(),
        });
        error
    }

    fn finish(&mut self, mut report: RunReport) -> RunReport {
        report.finish();
        self.sink.emit(&RunEvent::RunFinished {
            report: report.clone(),
        });
        report
    }
}

/// @ai:intent Invoke an operation, turning errors and panics into a message
/// @ai:effects subject-defined
fn call<S>(operation: &Operation<S>, instance: &mut S) -> std::result::Result<(), String> {
    guarded(|| operation.invoke(instance).map_err(|e| format!("{:#}", e)))
}

/// @ai:intent Run subject code, reporting a panic as an error message
/// @ai:effects subject-defined
fn guarded<T>(
    f: impl FnOnce() -> std::result::Result<T, String>,
) -> std::result::Result<T, String> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            Err(format!("panicked: {}", message))
        }
    }
}
