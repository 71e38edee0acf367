//! @ai:module:intent Registry of benchmark suites runnable from the CLI
//! @ai:module:layer application
//! @ai:module:public_api SuiteEntry, SuiteRegistry, SocialGraphBenchmark

pub mod social_graph;

pub use social_graph::SocialGraphBenchmark;

use crate::error::Result;
use crate::lifecycle::{self, PreparedRun};
use crate::report::RunReport;
use crate::runner::ExecutionEngine;
use crate::sink::ReportingSink;
use crate::subject::BenchmarkSubject;

type RunFn = fn(&mut dyn ReportingSink) -> Result<RunReport>;
type PrepareFn = fn() -> Result<PreparedRun>;

/// @ai:intent A named suite bound to its subject type
#[derive(Clone, Copy)]
pub struct SuiteEntry {
    pub name: &'static str,
    pub description: &'static str,
    run: RunFn,
    prepare: PrepareFn,
}

impl SuiteEntry {
    /// @ai:intent Bind a suite name to a subject type
    /// @ai:effects pure
    pub fn of<S: BenchmarkSubject>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            run: run_subject::<S>,
            prepare: prepare_subject::<S>,
        }
    }

    /// @ai:intent Run the suite's subject once
    /// @ai:effects subject-defined, time
    pub fn run(&self, sink: &mut dyn ReportingSink) -> Result<RunReport> {
        (self.run)(sink)
    }

    /// @ai:intent Validate the subject and build its plan without invoking anything
    /// @ai:effects pure
    pub fn prepare(&self) -> Result<PreparedRun> {
        (self.prepare)()
    }
}

impl std::fmt::Debug for SuiteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

fn run_subject<S: BenchmarkSubject>(sink: &mut dyn ReportingSink) -> Result<RunReport> {
    ExecutionEngine::new(sink).run::<S>()
}

fn prepare_subject<S: BenchmarkSubject>() -> Result<PreparedRun> {
    lifecycle::prepare(&S::subject_name(), &S::operations())
}

/// @ai:intent Ordered collection of registered suites
#[derive(Debug, Clone, Default)]
pub struct SuiteRegistry {
    entries: Vec<SuiteEntry>,
}

impl SuiteRegistry {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// @ai:intent Registry containing the suites shipped with the crate
    /// @ai:effects pure
    pub fn builtin() -> Self {
        Self::new().register(SuiteEntry::of::<SocialGraphBenchmark>(
            "social-graph",
            "In-memory friendship graph running the graph database query set",
        ))
    }

    /// @ai:intent Add a suite; a later entry with the same name replaces the earlier one
    /// @ai:effects pure
    pub fn register(mut self, entry: SuiteEntry) -> Self {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == entry.name) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
        self
    }

    pub fn find(&self, name: &str) -> Option<&SuiteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SuiteEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::OperationTable;

    struct Empty;

    impl BenchmarkSubject for Empty {
        fn instantiate() -> anyhow::Result<Self> {
            Ok(Self)
        }

        fn operations() -> OperationTable<Self> {
            OperationTable::new()
        }
    }

    #[test]
    fn test_builtin_contains_social_graph() {
        let registry = SuiteRegistry::builtin();
        assert_eq!(registry.names(), vec!["social-graph"]);
        assert!(registry.find("social-graph").is_some());
        assert!(registry.find("neo4j").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = SuiteRegistry::builtin()
            .register(SuiteEntry::of::<Empty>("empty", "first"))
            .register(SuiteEntry::of::<Empty>("empty", "second"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("empty").unwrap().description, "second");
    }

    #[test]
    fn test_social_graph_plan_runs_writes_first() {
        let prepared = SuiteRegistry::builtin()
            .find("social-graph")
            .unwrap()
            .prepare()
            .unwrap();

        let names = prepared.plan.names();
        assert_eq!(names[0], "createNewNodeWithNodeId10000");
        assert_eq!(names[4], "deleteNodeWithNodeId10000");
        assert_eq!(names[5], "findNodeWithLeastIngoingEdges");
        assert_eq!(prepared.plan.len(), 15);
        assert_eq!(prepared.setup.unwrap().name, "setup");
        assert_eq!(prepared.teardown.unwrap().name, "closeConnection");
    }
}
