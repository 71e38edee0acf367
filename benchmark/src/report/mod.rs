//! @ai:module:intent Report generation for session results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, MarkdownReporter, ChartGenerator, RunReport, SessionReport

pub mod charts;
pub mod json_report;
pub mod markdown_report;
pub mod types;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use json_report::{load_session, JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};
pub use types::{as_millis, RunReport, RunStatus, SessionReport, SuiteOutcome, TimingRecord};

use crate::config::ReportFormat;
use anyhow::{Context, Result};
use std::path::Path;

pub const JSON_REPORT_FILE: &str = "report.json";
pub const MARKDOWN_REPORT_FILE: &str = "report.md";

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: ChartGenerator::new(),
        }
    }

    /// @ai:intent Generate the requested report formats, returning the files written
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        session: &SessionReport,
        output_dir: &Path,
        formats: &[ReportFormat],
    ) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        let mut written = Vec::new();

        if formats.contains(&ReportFormat::Json) {
            self.json.generate(session, &output_dir.join(JSON_REPORT_FILE))?;
            written.push(JSON_REPORT_FILE.to_string());
        }

        if formats.contains(&ReportFormat::Markdown) {
            self.markdown
                .generate(session, &output_dir.join(MARKDOWN_REPORT_FILE))?;
            written.push(MARKDOWN_REPORT_FILE.to_string());
        }

        if formats.contains(&ReportFormat::Chart) {
            written.extend(self.charts.generate_all(session, output_dir)?);
        }

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(written)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_selected_formats_only() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("nested");
        let session = SessionReport::begin();

        let written = ReportGenerator::new()
            .generate_all(&session, &out, &[ReportFormat::Json, ReportFormat::Markdown])
            .unwrap();

        assert_eq!(written, vec![JSON_REPORT_FILE, MARKDOWN_REPORT_FILE]);
        assert!(out.join(JSON_REPORT_FILE).exists());
        assert!(out.join(MARKDOWN_REPORT_FILE).exists());
    }
}
