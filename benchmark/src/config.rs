//! @ai:module:intent Configuration structs for the benchmark harness
//! @ai:module:layer infrastructure
//! @ai:module:public_api GraphbenchConfig, RunConfig, ReportConfig, FilterConfig, SuiteFilter, ReportFormat
//! @ai:module:stateless true

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Main configuration for the harness
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphbenchConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// @ai:intent Which suites to run and how failures affect the session
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Keep running later suites after one fails
    #[serde(default = "default_continue_on_failure")]
    pub continue_on_failure: bool,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// @ai:intent Suite selection by exact name or regex
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub suites: Option<Vec<String>>,
    pub pattern: Option<String>,
}

/// @ai:intent Output format of a generated report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Markdown,
    Chart,
}

impl ReportFormat {
    /// @ai:intent Get string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Chart => "chart",
        }
    }

    pub fn all() -> Vec<ReportFormat> {
        vec![ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Chart]
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "chart" | "png" => Ok(ReportFormat::Chart),
            other => anyhow::bail!("Unknown report format: {}", other),
        }
    }
}

/// @ai:intent Report output configuration
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "ReportFormat::all")]
    pub formats: Vec<ReportFormat>,
    /// JSON-lines log receiving every run event
    #[serde(default)]
    pub events_file: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            continue_on_failure: default_continue_on_failure(),
            filter: FilterConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: ReportFormat::all(),
            events_file: None,
        }
    }
}

fn default_continue_on_failure() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl GraphbenchConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// @ai:intent Compiled form of FilterConfig
#[derive(Debug, Clone, Default)]
pub struct SuiteFilter {
    names: Option<Vec<String>>,
    pattern: Option<Regex>,
}

impl SuiteFilter {
    /// @ai:intent Compile the filter, rejecting an invalid regex
    /// @ai:effects pure
    pub fn compile(config: &FilterConfig) -> anyhow::Result<Self> {
        let pattern = config
            .pattern
            .as_deref()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid suite pattern: {}", p)))
            .transpose()?;

        Ok(Self {
            names: config.suites.clone(),
            pattern,
        })
    }

    /// @ai:intent Check if a suite passes every configured criterion
    /// @ai:effects pure
    pub fn matches(&self, suite: &str) -> bool {
        let name_match = self
            .names
            .as_ref()
            .map(|names| names.iter().any(|n| n == suite))
            .unwrap_or(true);

        let pattern_match = self
            .pattern
            .as_ref()
            .map(|re| re.is_match(suite))
            .unwrap_or(true);

        name_match && pattern_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filter_matches_all_when_empty() {
        let filter = SuiteFilter::compile(&FilterConfig::default()).unwrap();
        assert!(filter.matches("social-graph"));
    }

    #[test]
    fn test_filter_matches_names_and_pattern() {
        let filter = SuiteFilter::compile(&FilterConfig {
            suites: Some(vec!["social-graph".to_string(), "neo4j".to_string()]),
            pattern: Some("^social".to_string()),
        })
        .unwrap();

        assert!(filter.matches("social-graph"));
        assert!(!filter.matches("neo4j"));
        assert!(!filter.matches("social-network"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = SuiteFilter::compile(&FilterConfig {
            pattern: Some("(".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: GraphbenchConfig = toml::from_str(
            r#"
[report]
formats = ["json"]
"#,
        )
        .unwrap();

        assert!(config.run.continue_on_failure);
        assert_eq!(config.report.output_dir, PathBuf::from("results"));
        assert_eq!(config.report.formats, vec![ReportFormat::Json]);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("graphbench.toml");

        let mut config = GraphbenchConfig::default();
        config.run.filter.suites = Some(vec!["social-graph".to_string()]);
        config.report.events_file = Some(PathBuf::from("events.jsonl"));
        config.save(&path).unwrap();

        assert_eq!(GraphbenchConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("MD".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }
}
