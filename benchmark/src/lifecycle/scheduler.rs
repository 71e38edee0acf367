//! @ai:module:intent Priority-ordered execution planning
//! @ai:module:layer application
//! @ai:module:public_api PriorityScheduler, ExecutionPlan
//! @ai:module:stateless true
//!
//! Benchmarks are grouped by priority, groups run highest priority first,
//! and members of a group keep the order in which the subject registered them.

use crate::lifecycle::discovery::BenchmarkDescriptor;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// @ai:intent Immutable ordered sequence of benchmarks to execute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan {
    benchmarks: Vec<BenchmarkDescriptor>,
}

impl ExecutionPlan {
    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkDescriptor> {
        self.benchmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// @ai:intent Benchmark names in execution order
    /// @ai:effects pure
    pub fn names(&self) -> Vec<&str> {
        self.benchmarks.iter().map(|b| b.name.as_str()).collect()
    }

    /// @ai:intent Total number of timed invocations the plan schedules
    /// @ai:effects pure
    pub fn total_iterations(&self) -> u64 {
        self.benchmarks
            .iter()
            .map(|b| u64::from(b.iteration_count))
            .sum()
    }
}

impl<'a> IntoIterator for &'a ExecutionPlan {
    type Item = &'a BenchmarkDescriptor;
    type IntoIter = std::slice::Iter<'a, BenchmarkDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.benchmarks.iter()
    }
}

pub struct PriorityScheduler;

impl PriorityScheduler {
    /// @ai:intent Build the execution plan from benchmarks in discovery order
    /// @ai:pre benchmarks are in discovery order
    /// @ai:post groups descend by priority; ties keep discovery order
    /// @ai:effects pure
    pub fn plan(benchmarks: Vec<BenchmarkDescriptor>) -> ExecutionPlan {
        let mut groups: BTreeMap<Reverse<i32>, Vec<BenchmarkDescriptor>> = BTreeMap::new();

        for benchmark in benchmarks {
            groups
                .entry(Reverse(benchmark.priority))
                .or_default()
                .push(benchmark);
        }

        ExecutionPlan {
            benchmarks: groups.into_values().flatten().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bench(index: usize, name: &str, priority: i32) -> BenchmarkDescriptor {
        BenchmarkDescriptor {
            index,
            name: name.to_string(),
            iteration_count: 1,
            priority,
            parameter_count: 0,
        }
    }

    #[test]
    fn test_groups_descend_and_ties_keep_discovery_order() {
        let plan = PriorityScheduler::plan(vec![
            bench(0, "a", 10),
            bench(1, "b", 10),
            bench(2, "c", 5),
            bench(3, "d", 20),
        ]);

        assert_eq!(plan.names(), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn test_ties_are_not_sorted_by_name() {
        let plan = PriorityScheduler::plan(vec![
            bench(0, "zeta", 0),
            bench(1, "alpha", 0),
            bench(2, "mid", 0),
        ]);

        assert_eq!(plan.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_negative_priorities_run_last() {
        let plan = PriorityScheduler::plan(vec![
            bench(0, "late", -1),
            bench(1, "default", 0),
        ]);

        assert_eq!(plan.names(), vec!["default", "late"]);
    }

    #[test]
    fn test_empty_plan() {
        let plan = PriorityScheduler::plan(vec![]);
        assert!(plan.is_empty());
        assert_eq!(plan.total_iterations(), 0);
    }
}
