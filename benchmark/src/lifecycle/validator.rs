//! @ai:module:intent Enforce cardinality and signature rules on lifecycle methods
//! @ai:module:layer application
//! @ai:module:public_api LifecycleValidator, ValidatedLifecycle
//! @ai:module:stateless true

use crate::error::{HarnessError, Result};
use crate::lifecycle::discovery::{BenchmarkDescriptor, DiscoveredOperations, LifecycleMethod};

/// @ai:intent Discovered operations that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLifecycle {
    pub setup: Option<LifecycleMethod>,
    pub benchmarks: Vec<BenchmarkDescriptor>,
    pub teardown: Option<LifecycleMethod>,
}

pub struct LifecycleValidator;

impl LifecycleValidator {
    /// @ai:intent Validate discovered operations before anything is invoked
    /// @ai:pre discovered was produced by MethodDiscovery for the same subject
    /// @ai:post setup and teardown are each at most one no-argument method
    /// @ai:effects pure
    pub fn validate(subject: &str, discovered: DiscoveredOperations) -> Result<ValidatedLifecycle> {
        let setup = Self::single_lifecycle_method(subject, discovered.setup, "Setup")?;
        let teardown = Self::single_lifecycle_method(subject, discovered.teardown, "TearDown")?;

        for benchmark in &discovered.benchmarks {
            if benchmark.parameter_count > 0 {
                return Err(HarnessError::configuration(
                    subject,
                    format!(
                        "Benchmark method {} cannot have parameters.",
                        benchmark.name
                    ),
                ));
            }

            if benchmark.iteration_count == 0 {
                return Err(HarnessError::configuration(
                    subject,
                    format!(
                        "Benchmark method {} must declare a positive iteration count.",
                        benchmark.name
                    ),
                ));
            }
        }

        Ok(ValidatedLifecycle {
            setup,
            benchmarks: discovered.benchmarks,
            teardown,
        })
    }

    fn single_lifecycle_method(
        subject: &str,
        mut methods: Vec<LifecycleMethod>,
        role: &str,
    ) -> Result<Option<LifecycleMethod>> {
        if methods.len() > 1 {
            let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
            return Err(HarnessError::configuration(
                subject,
                format!(
                    "Only one method can be marked with {}, found: {}.",
                    role,
                    names.join(", ")
                ),
            ));
        }

        let method = methods.pop();

        if let Some(ref m) = method {
            if m.parameter_count > 0 {
                return Err(HarnessError::configuration(
                    subject,
                    format!(
                        "Methods marked with {} cannot have parameters ({} declares {}).",
                        role, m.name, m.parameter_count
                    ),
                ));
            }
        }

        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifecycle(index: usize, name: &str, parameter_count: usize) -> LifecycleMethod {
        LifecycleMethod {
            index,
            name: name.to_string(),
            parameter_count,
        }
    }

    fn bench(index: usize, name: &str, iteration_count: u32) -> BenchmarkDescriptor {
        BenchmarkDescriptor {
            index,
            name: name.to_string(),
            iteration_count,
            priority: 0,
            parameter_count: 0,
        }
    }

    #[test]
    fn test_empty_subject_is_valid() {
        let validated = LifecycleValidator::validate("Empty", DiscoveredOperations::default()).unwrap();
        assert!(validated.setup.is_none());
        assert!(validated.teardown.is_none());
        assert!(validated.benchmarks.is_empty());
    }

    #[test]
    fn test_two_setups_rejected() {
        let discovered = DiscoveredOperations {
            setup: vec![lifecycle(0, "setup", 0), lifecycle(1, "init", 0)],
            ..Default::default()
        };

        let err = LifecycleValidator::validate("Subject", discovered).unwrap_err();
        assert!(matches!(err, HarnessError::Configuration { .. }));
        assert!(err.to_string().contains("Only one method can be marked with Setup"));
    }

    #[test]
    fn test_two_teardowns_rejected() {
        let discovered = DiscoveredOperations {
            teardown: vec![lifecycle(0, "close", 0), lifecycle(1, "drop", 0)],
            ..Default::default()
        };

        let err = LifecycleValidator::validate("Subject", discovered).unwrap_err();
        assert!(err.to_string().contains("TearDown"));
    }

    #[test]
    fn test_setup_with_parameters_rejected() {
        let discovered = DiscoveredOperations {
            setup: vec![lifecycle(0, "setup", 1)],
            ..Default::default()
        };

        let err = LifecycleValidator::validate("Subject", discovered).unwrap_err();
        assert!(err.to_string().contains("cannot have parameters"));
    }

    #[test]
    fn test_teardown_with_parameters_rejected() {
        let discovered = DiscoveredOperations {
            teardown: vec![lifecycle(0, "closeConnection", 2)],
            ..Default::default()
        };

        let err = LifecycleValidator::validate("Subject", discovered).unwrap_err();
        assert!(matches!(err, HarnessError::Configuration { .. }));
        assert!(err
            .to_string()
            .contains("Methods marked with TearDown cannot have parameters"));
    }

    #[test]
    fn test_benchmark_with_parameters_rejected() {
        let mut with_params = bench(1, "findFriends", 10);
        with_params.parameter_count = 1;

        let discovered = DiscoveredOperations {
            benchmarks: vec![bench(0, "query", 10), with_params],
            ..Default::default()
        };

        let err = LifecycleValidator::validate("Subject", discovered).unwrap_err();
        assert!(matches!(err, HarnessError::Configuration { .. }));
        assert!(err
            .to_string()
            .contains("Benchmark method findFriends cannot have parameters."));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let discovered = DiscoveredOperations {
            benchmarks: vec![bench(0, "never", 0)],
            ..Default::default()
        };

        let err = LifecycleValidator::validate("Subject", discovered).unwrap_err();
        assert!(err.to_string().contains("positive iteration count"));
    }

    #[test]
    fn test_valid_lifecycle_is_kept() {
        let discovered = DiscoveredOperations {
            setup: vec![lifecycle(0, "setup", 0)],
            benchmarks: vec![bench(1, "query", 10)],
            teardown: vec![lifecycle(2, "closeConnection", 0)],
        };

        let validated = LifecycleValidator::validate("Subject", discovered).unwrap();
        assert_eq!(validated.setup.unwrap().name, "setup");
        assert_eq!(validated.teardown.unwrap().index, 2);
        assert_eq!(validated.benchmarks.len(), 1);
    }
}
