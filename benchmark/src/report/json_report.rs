//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, load_session
//! @ai:module:stateless true

use crate::report::types::SessionReport;
use anyhow::{Context, Result};
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from a session
    fn generate(&self, session: &SessionReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates JSON reports from session results
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, session: &SessionReport, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

/// @ai:intent Read a session previously written by JsonReporter
/// @ai:effects fs:read
pub fn load_session(path: &Path) -> Result<SessionReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse results file: {}", path.display()))
}
