//! @ai:module:intent Error taxonomy for benchmark runs
//! @ai:module:layer domain
//! @ai:module:public_api HarnessError, Phase, Result
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// @ai:intent Lifecycle phase of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Instantiation,
    Configuration,
    Setup,
    Benchmark,
    Teardown,
}

impl Phase {
    /// @ai:intent Get string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Instantiation => "instantiation",
            Phase::Configuration => "configuration",
            Phase::Setup => "setup",
            Phase::Benchmark => "benchmark",
            Phase::Teardown => "teardown",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Unified error type for all harness failures
/// @ai:invariant every variant is fatal to the run it occurred in
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HarnessError {
    #[error("Invalid benchmark configuration for {subject}: {message}")]
    Configuration { subject: String, message: String },

    #[error("Failed to instantiate {subject}: {message}")]
    Instantiation { subject: String, message: String },

    #[error("Setup method {operation} failed: {message}")]
    Setup { operation: String, message: String },

    #[error("Benchmark method {operation} failed on iteration {iteration}: {message}")]
    BenchmarkExecution {
        operation: String,
        iteration: u32,
        message: String,
    },

    #[error("Tear down method {operation} failed: {message}")]
    Teardown { operation: String, message: String },
}

impl HarnessError {
    /// @ai:intent Phase in which the error was raised
    /// @ai:effects pure
    pub fn phase(&self) -> Phase {
        match self {
            HarnessError::Configuration { .. } => Phase::Configuration,
            HarnessError::Instantiation { .. } => Phase::Instantiation,
            HarnessError::Setup { .. } => Phase::Setup,
            HarnessError::BenchmarkExecution { .. } => Phase::Benchmark,
            HarnessError::Teardown { .. } => Phase::Teardown,
        }
    }

    /// @ai:intent Name of the failing operation, when one was invoked
    /// @ai:effects pure
    pub fn operation(&self) -> Option<&str> {
        match self {
            HarnessError::Setup { operation, .. }
            | HarnessError::BenchmarkExecution { operation, .. }
            | HarnessError::Teardown { operation, .. } => Some(operation),
            HarnessError::Configuration { .. } | HarnessError::Instantiation { .. } => None,
        }
    }

    /// @ai:intent 1-based iteration index of a failed benchmark iteration
    /// @ai:effects pure
    pub fn iteration(&self) -> Option<u32> {
        match self {
            HarnessError::BenchmarkExecution { iteration, .. } => Some(*iteration),
            _ => None,
        }
    }

    pub(crate) fn configuration(subject: &str, message: impl Into<String>) -> Self {
        HarnessError::Configuration {
            subject: subject.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_error_exposes_location() {
        let err = HarnessError::BenchmarkExecution {
            operation: "findMostConnectedNode".to_string(),
            iteration: 3,
            message: "connection reset".to_string(),
        };

        assert_eq!(err.phase(), Phase::Benchmark);
        assert_eq!(err.operation(), Some("findMostConnectedNode"));
        assert_eq!(err.iteration(), Some(3));
        assert_eq!(
            err.to_string(),
            "Benchmark method findMostConnectedNode failed on iteration 3: connection reset"
        );
    }

    #[test]
    fn test_configuration_error_has_no_operation() {
        let err = HarnessError::configuration("Neo4jBenchmark", "duplicate setup");
        assert_eq!(err.phase(), Phase::Configuration);
        assert!(err.operation().is_none());
        assert!(err.iteration().is_none());
    }

    #[test]
    fn test_error_serializes_with_kind_tag() {
        let err = HarnessError::Setup {
            operation: "setup".to_string(),
            message: "boom".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"setup\""));

        let back: HarnessError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
