//! @ai:module:intent Partition a subject's operations by declared role
//! @ai:module:layer application
//! @ai:module:public_api MethodDiscovery, DiscoveredOperations, LifecycleMethod, BenchmarkDescriptor
//! @ai:module:stateless true

use crate::error::{HarnessError, Result};
use crate::subject::{MethodMarker, OperationTable};
use serde::{Deserialize, Serialize};

/// @ai:intent A discovered setup or teardown operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleMethod {
    /// Position in the subject's operation table
    pub index: usize,
    pub name: String,
    pub parameter_count: usize,
}

/// @ai:intent A discovered benchmark operation with its marker values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkDescriptor {
    pub index: usize,
    pub name: String,
    pub iteration_count: u32,
    pub priority: i32,
    pub parameter_count: usize,
}

/// @ai:intent Operations grouped by role, each group in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredOperations {
    pub setup: Vec<LifecycleMethod>,
    pub benchmarks: Vec<BenchmarkDescriptor>,
    pub teardown: Vec<LifecycleMethod>,
}

/// @ai:intent Inspects operation tables; never invokes anything
pub struct MethodDiscovery;

impl MethodDiscovery {
    /// @ai:intent Partition the table into setup, benchmark and teardown sets
    /// @ai:post unmarked operations are absent from the result
    /// @ai:effects pure
    pub fn discover<S>(subject: &str, table: &OperationTable<S>) -> Result<DiscoveredOperations> {
        let mut discovered = DiscoveredOperations::default();

        for (index, operation) in table.iter().enumerate() {
            let marker = match operation.markers() {
                [] => continue,
                [marker] => *marker,
                markers => {
                    let roles: Vec<_> = markers.iter().map(|m| m.kind().as_str()).collect();
                    return Err(HarnessError::configuration(
                        subject,
                        format!(
                            "Method {} carries more than one role marker ({}).",
                            operation.name(),
                            roles.join(", ")
                        ),
                    ));
                }
            };

            let parameter_count = operation.parameters().len();

            match marker {
                MethodMarker::Setup => discovered.setup.push(LifecycleMethod {
                    index,
                    name: operation.name().to_string(),
                    parameter_count,
                }),
                MethodMarker::TearDown => discovered.teardown.push(LifecycleMethod {
                    index,
                    name: operation.name().to_string(),
                    parameter_count,
                }),
                MethodMarker::Benchmark(benchmark) => {
                    discovered.benchmarks.push(BenchmarkDescriptor {
                        index,
                        name: operation.name().to_string(),
                        iteration_count: benchmark.iteration_count,
                        priority: benchmark.priority,
                        parameter_count,
                    })
                }
            }
        }

        tracing::debug!(
            "{}: discovered {} setup, {} benchmark, {} tear down methods",
            subject,
            discovered.setup.len(),
            discovered.benchmarks.len(),
            discovered.teardown.len()
        );

        Ok(discovered)
    }
}
