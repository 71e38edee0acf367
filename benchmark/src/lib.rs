//! @ai:module:intent Graphbench benchmark harness library
//! @ai:module:layer application
//! @ai:module:public_api config, error, lifecycle, report, runner, sink, subject, suites

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod report;
pub mod runner;
pub mod sink;
pub mod subject;
pub mod suites;

pub use config::GraphbenchConfig;
pub use error::{HarnessError, Phase};
pub use lifecycle::{ExecutionPlan, LifecycleValidator, MethodDiscovery, PriorityScheduler};
pub use report::{ReportGenerator, RunReport, RunStatus, SessionReport, TimingRecord};
pub use runner::{BenchmarkSession, ExecutionEngine};
pub use sink::{ReportingSink, RunEvent};
pub use subject::{BenchmarkMarker, BenchmarkSubject, MethodMarker, Operation, OperationTable};
pub use suites::{SuiteEntry, SuiteRegistry};
