//! @ai:module:intent Role markers attached to subject operations
//! @ai:module:layer domain
//! @ai:module:public_api MethodKind, MethodMarker, BenchmarkMarker
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Declared role of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Setup,
    Benchmark,
    TearDown,
}

impl MethodKind {
    /// @ai:intent Convert kind to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Setup => "setup",
            MethodKind::Benchmark => "benchmark",
            MethodKind::TearDown => "teardown",
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Parameters of a benchmark marker
/// @ai:invariant iteration_count is expected to be positive; zero is rejected at validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkMarker {
    #[serde(default = "default_iteration_count")]
    pub iteration_count: u32,
    #[serde(default)]
    pub priority: i32,
}

impl BenchmarkMarker {
    /// @ai:intent Create a marker with default iteration count and priority
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            iteration_count: default_iteration_count(),
            priority: 0,
        }
    }

    /// @ai:effects pure
    pub fn iterations(mut self, iteration_count: u32) -> Self {
        self.iteration_count = iteration_count;
        self
    }

    /// @ai:effects pure
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for BenchmarkMarker {
    fn default() -> Self {
        Self::new()
    }
}

fn default_iteration_count() -> u32 {
    1
}

/// @ai:intent Metadata identifying an operation's role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MethodMarker {
    Setup,
    Benchmark(BenchmarkMarker),
    TearDown,
}

impl MethodMarker {
    /// @ai:intent Get the role this marker declares
    /// @ai:effects pure
    pub fn kind(&self) -> MethodKind {
        match self {
            MethodMarker::Setup => MethodKind::Setup,
            MethodMarker::Benchmark(_) => MethodKind::Benchmark,
            MethodMarker::TearDown => MethodKind::TearDown,
        }
    }
}

impl From<BenchmarkMarker> for MethodMarker {
    fn from(marker: BenchmarkMarker) -> Self {
        MethodMarker::Benchmark(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_marker_defaults() {
        let marker = BenchmarkMarker::default();
        assert_eq!(marker.iteration_count, 1);
        assert_eq!(marker.priority, 0);
    }

    #[test]
    fn test_benchmark_marker_builder() {
        let marker = BenchmarkMarker::new().iterations(10).priority(-3);
        assert_eq!(marker.iteration_count, 10);
        assert_eq!(marker.priority, -3);
        assert_eq!(MethodMarker::from(marker).kind(), MethodKind::Benchmark);
    }

    #[test]
    fn test_marker_defaults_when_deserialized() {
        let marker: MethodMarker = serde_json::from_str(r#"{"kind":"benchmark"}"#).unwrap();
        assert_eq!(marker, MethodMarker::Benchmark(BenchmarkMarker::default()));
    }
}
