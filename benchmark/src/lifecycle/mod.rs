//! @ai:module:intent Discovery, validation and scheduling of subject operations
//! @ai:module:layer application
//! @ai:module:public_api MethodDiscovery, LifecycleValidator, PriorityScheduler, ExecutionPlan, prepare

pub mod discovery;
pub mod scheduler;
pub mod validator;

pub use discovery::{BenchmarkDescriptor, DiscoveredOperations, LifecycleMethod, MethodDiscovery};
pub use scheduler::{ExecutionPlan, PriorityScheduler};
pub use validator::{LifecycleValidator, ValidatedLifecycle};

use crate::error::Result;
use crate::subject::OperationTable;

/// @ai:intent Validated lifecycle methods plus the benchmark execution plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRun {
    pub setup: Option<LifecycleMethod>,
    pub plan: ExecutionPlan,
    pub teardown: Option<LifecycleMethod>,
}

/// @ai:intent Run discovery, validation and scheduling for one subject
/// @ai:effects pure
pub fn prepare<S>(subject: &str, table: &OperationTable<S>) -> Result<PreparedRun> {
    let discovered = MethodDiscovery::discover(subject, table)?;
    let validated = LifecycleValidator::validate(subject, discovered)?;

    Ok(PreparedRun {
        setup: validated.setup,
        plan: PriorityScheduler::plan(validated.benchmarks),
        teardown: validated.teardown,
    })
}
