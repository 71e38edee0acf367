//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::report::types::{RunReport, SessionReport, SuiteOutcome};
use anyhow::Result;
use std::fmt::{self, Write as FmtWrite};
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown report from a session
    fn generate(&self, session: &SessionReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from session results
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Header and per-suite status table
    /// @ai:effects pure
    fn write_summary(output: &mut String, session: &SessionReport) -> fmt::Result {
        writeln!(output, "# Graphbench Results")?;
        writeln!(output)?;
        writeln!(output, "**Started:** {}", session.started_at.to_rfc3339())?;
        writeln!(output, "**Finished:** {}", session.finished_at.to_rfc3339())?;
        writeln!(
            output,
            "**Suites:** {} ({} failed)",
            session.suites.len(),
            session.failed_count()
        )?;
        writeln!(output)?;

        writeln!(output, "| Suite | Subject | Status | Benchmarks | Iterations |")?;
        writeln!(output, "|-------|---------|--------|------------|------------|")?;

        for outcome in &session.suites {
            match outcome {
                SuiteOutcome::Ran { suite, report } => writeln!(
                    output,
                    "| {} | {} | {} | {}/{} | {} |",
                    suite,
                    report.subject,
                    report.status,
                    report.records.iter().filter(|r| r.is_complete()).count(),
                    report.plan.len(),
                    report.total_iterations()
                )?,
                SuiteOutcome::Rejected { suite, error } => writeln!(
                    output,
                    "| {} | - | rejected ({}) | - | - |",
                    suite,
                    error.phase()
                )?,
            }
        }

        writeln!(output)
    }

    /// @ai:intent Status, failures and timing table of one suite
    /// @ai:effects pure
    fn write_run(output: &mut String, suite: &str, report: &RunReport) -> fmt::Result {
        writeln!(output, "## {}", suite)?;
        writeln!(output)?;
        writeln!(output, "**Subject:** {}", report.subject)?;
        writeln!(output, "**Status:** {}", report.status)?;
        writeln!(
            output,
            "**Duration:** {} ms",
            (report.finished_at - report.started_at).num_milliseconds()
        )?;
        writeln!(output)?;

        if !report.errors.is_empty() {
            writeln!(output, "### Failures")?;
            writeln!(output)?;
            for error in &report.errors {
                writeln!(output, "- `{}`: {}", error.phase(), error)?;
            }
            writeln!(output)?;
        }

        if report.records.is_empty() {
            writeln!(output, "No benchmark was executed.")?;
            return writeln!(output);
        }

        writeln!(
            output,
            "| Operation | Priority | Iterations | Total (ms) | Durations (ms) |"
        )?;
        writeln!(
            output,
            "|-----------|----------|------------|------------|----------------|"
        )?;

        for record in &report.records {
            let durations: Vec<String> = record.durations_ms.iter().map(u64::to_string).collect();

            writeln!(
                output,
                "| {} | {} | {}/{} | {} | {} |",
                record.operation,
                record.priority,
                record.executed_iterations(),
                record.iteration_count,
                record.total_ms(),
                durations.join(", ")
            )?;
        }

        writeln!(output)
    }

    fn write_rejection(output: &mut String, suite: &str, outcome: &SuiteOutcome) -> fmt::Result {
        if let SuiteOutcome::Rejected { error, .. } = outcome {
            writeln!(output, "## {}", suite)?;
            writeln!(output)?;
            writeln!(output, "**Status:** rejected before any invocation")?;
            writeln!(output)?;
            writeln!(output, "- `{}`: {}", error.phase(), error)?;
            writeln!(output)?;
        }
        Ok(())
    }

    /// @ai:intent Render the full document
    /// @ai:effects pure
    pub fn render(session: &SessionReport) -> Result<String> {
        let mut content = String::new();

        Self::write_summary(&mut content, session)?;

        for outcome in &session.suites {
            match outcome.report() {
                Some(report) => Self::write_run(&mut content, outcome.suite(), report)?,
                None => Self::write_rejection(&mut content, outcome.suite(), outcome)?,
            }
        }

        Ok(content)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, session: &SessionReport, output_path: &Path) -> Result<()> {
        let content = Self::render(session)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }
}
