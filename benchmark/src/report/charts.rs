//! @ai:module:intent Chart generation for session results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator
//! @ai:module:stateless true

use crate::report::types::{RunReport, SessionReport};
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts from a session, returning the file names written
    fn generate_all(&self, session: &SessionReport, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Generates per-suite iteration charts
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent File name of the chart of a suite
    /// @ai:effects pure
    pub fn chart_file_name(suite: &str) -> String {
        let stem: String = suite
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}.png", stem)
    }

    /// @ai:intent Draw one line per operation, iteration number against elapsed milliseconds
    /// @ai:pre report has at least one timed iteration
    /// @ai:effects fs:write
    fn generate_suite_chart(&self, suite: &str, report: &RunReport, output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let max_iterations = report
            .records
            .iter()
            .map(|r| r.executed_iterations())
            .max()
            .unwrap_or(1) as u32;
        let max_ms = report
            .records
            .iter()
            .flat_map(|r| r.durations_ms.iter().copied())
            .max()
            .unwrap_or(0);
        let y_top = ((max_ms as f64) * 1.1).max(1.0);

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} ({}): iteration times", suite, report.subject),
                ("sans-serif", 26),
            )
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(1u32..(max_iterations + 1), 0f64..y_top)?;

        chart
            .configure_mesh()
            .x_desc("Iteration")
            .y_desc("Elapsed (ms)")
            .draw()?;

        for (i, record) in report.records.iter().enumerate() {
            if record.durations_ms.is_empty() {
                continue;
            }

            let color = Palette99::pick(i).to_rgba();
            let points: Vec<(u32, f64)> = record
                .durations_ms
                .iter()
                .enumerate()
                .map(|(n, ms)| (n as u32 + 1, *ms as f64))
                .collect();

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(record.operation.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

            chart.draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, 3, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate one chart per suite that timed at least one iteration
    /// @ai:effects fs:write
    fn generate_all(&self, session: &SessionReport, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        for outcome in &session.suites {
            let Some(report) = outcome.report() else {
                continue;
            };

            if report.total_iterations() == 0 {
                tracing::debug!("Skipping chart for {}: nothing was timed", outcome.suite());
                continue;
            }

            let file_name = Self::chart_file_name(outcome.suite());
            self.generate_suite_chart(outcome.suite(), report, &output_dir.join(&file_name))?;
            generated.push(file_name);
        }

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::{SuiteOutcome, TimingRecord};
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_session() -> SessionReport {
        let mut writes = TimingRecord::new("createNode", 90, 1);
        writes.push(Duration::from_millis(3));

        let mut reads = TimingRecord::new("findFriends", 0, 3);
        for ms in [5, 2, 4] {
            reads.push(Duration::from_millis(ms));
        }

        let mut report = RunReport::begin(
            "SocialGraphBenchmark",
            vec!["createNode".to_string(), "findFriends".to_string()],
        );
        report.records = vec![writes, reads];

        let mut session = SessionReport::begin();
        session.suites.push(SuiteOutcome::Ran {
            suite: "social-graph".to_string(),
            report,
        });
        session.suites.push(SuiteOutcome::Ran {
            suite: "empty".to_string(),
            report: RunReport::begin("Empty", vec![]),
        });
        session
    }

    #[test]
    fn test_chart_file_name_is_sanitized() {
        assert_eq!(ChartGenerator::chart_file_name("social-graph"), "social-graph.png");
        assert_eq!(ChartGenerator::chart_file_name("neo4j/bolt"), "neo4j_bolt.png");
    }

    #[test]
    fn test_generate_all_charts() {
        let generator = ChartGenerator::new();
        let temp = TempDir::new().unwrap();

        let files = generator.generate_all(&create_test_session(), temp.path()).unwrap();

        assert_eq!(files, vec!["social-graph.png".to_string()]);
        assert!(temp.path().join("social-graph.png").exists());
        assert!(!temp.path().join("empty.png").exists());
    }
}
