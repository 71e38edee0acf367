//! @ai:module:intent Run every selected suite of a registry in registration order
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkSession
//! @ai:module:stateless true

use crate::config::{RunConfig, SuiteFilter};
use crate::report::{SessionReport, SuiteOutcome};
use crate::sink::ReportingSink;
use crate::suites::{SuiteEntry, SuiteRegistry};

/// @ai:intent Runs a filtered set of suites against one sink
pub struct BenchmarkSession {
    registry: SuiteRegistry,
    filter: SuiteFilter,
    continue_on_failure: bool,
}

impl BenchmarkSession {
    /// @ai:intent Create a session running every registered suite
    /// @ai:effects pure
    pub fn new(registry: SuiteRegistry) -> Self {
        Self {
            registry,
            filter: SuiteFilter::default(),
            continue_on_failure: true,
        }
    }

    /// @ai:intent Create a session from the [run] section of a config file
    /// @ai:effects pure
    pub fn from_config(registry: SuiteRegistry, config: &RunConfig) -> anyhow::Result<Self> {
        Ok(Self {
            registry,
            filter: SuiteFilter::compile(&config.filter)?,
            continue_on_failure: config.continue_on_failure,
        })
    }

    pub fn with_filter(mut self, filter: SuiteFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn continue_on_failure(mut self, enabled: bool) -> Self {
        self.continue_on_failure = enabled;
        self
    }

    /// @ai:intent Suites that pass the filter, in registration order
    /// @ai:effects pure
    pub fn selected(&self) -> Vec<&SuiteEntry> {
        self.registry
            .iter()
            .filter(|entry| self.filter.matches(entry.name))
            .collect()
    }

    /// @ai:intent Run the selected suites one after another
    /// @ai:post one outcome per attempted suite; stops after the first failure unless continue_on_failure
    /// @ai:effects subject-defined, time
    pub fn run(&self, sink: &mut dyn ReportingSink) -> SessionReport {
        let mut session = SessionReport::begin();
        let selected = self.selected();

        if selected.is_empty() {
            tracing::warn!("No benchmark suites matched the filter");
        }

        for entry in selected {
            tracing::info!("Running suite {}", entry.name);

            let outcome = match entry.run(sink) {
                Ok(report) => SuiteOutcome::Ran {
                    suite: entry.name.to_string(),
                    report,
                },
                Err(error) => SuiteOutcome::Rejected {
                    suite: entry.name.to_string(),
                    error,
                },
            };

            let failed = !outcome.is_success();
            session.suites.push(outcome);

            if failed && !self.continue_on_failure {
                tracing::warn!("Stopping after failed suite {}", entry.name);
                break;
            }
        }

        session.finish();
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::sink::RecordingSink;
    use crate::subject::{BenchmarkMarker, BenchmarkSubject, OperationTable};

    struct Broken;

    impl BenchmarkSubject for Broken {
        fn instantiate() -> anyhow::Result<Self> {
            anyhow::bail!("connection refused")
        }

        fn operations() -> OperationTable<Self> {
            OperationTable::new()
        }
    }

    struct Quick;

    impl BenchmarkSubject for Quick {
        fn instantiate() -> anyhow::Result<Self> {
            Ok(Self)
        }

        fn operations() -> OperationTable<Self> {
            OperationTable::new().benchmark("noop", BenchmarkMarker::new().iterations(2), |_: &mut Quick| Ok(()))
        }
    }

    fn registry() -> SuiteRegistry {
        SuiteRegistry::new()
            .register(SuiteEntry::of::<Broken>("broken", "fails to instantiate"))
            .register(SuiteEntry::of::<Quick>("quick", "two no-op iterations"))
    }

    #[test]
    fn test_continue_after_rejected_suite() {
        let session = BenchmarkSession::new(registry());
        let mut sink = RecordingSink::new();
        let report = session.run(&mut sink);

        assert_eq!(report.suites.len(), 2);
        assert!(matches!(report.suites[0], SuiteOutcome::Rejected { .. }));
        assert!(report.suites[1].is_success());
        assert_eq!(report.failed_count(), 1);
        assert_eq!(sink.invocation_count("noop"), 2);
    }

    #[test]
    fn test_stop_on_first_failure() {
        let session = BenchmarkSession::new(registry()).continue_on_failure(false);
        let report = session.run(&mut RecordingSink::new());

        assert_eq!(report.suites.len(), 1);
        assert_eq!(report.suites[0].suite(), "broken");
    }

    #[test]
    fn test_filter_selects_suites() {
        let config = RunConfig {
            filter: FilterConfig {
                pattern: Some("^qu".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let session = BenchmarkSession::from_config(registry(), &config).unwrap();

        let names: Vec<_> = session.selected().iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["quick"]);
        assert!(session.run(&mut RecordingSink::new()).all_succeeded());
    }
}
