//! @ai:module:intent Append run events to a JSON-lines file
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonLinesSink
//! @ai:module:stateless false

use crate::sink::{ReportingSink, RunEvent};
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// @ai:intent File sink writing one JSON object per event
pub struct JsonLinesSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// @ai:intent Open (or create) the event log in append mode
    /// @ai:effects fs:write
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open event log {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_event(&mut self, event: &RunEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;

        if matches!(
            event,
            RunEvent::RunFinished { .. } | RunEvent::RunRejected { .. }
        ) {
            self.writer.flush()?;
        }

        Ok(())
    }
}

impl ReportingSink for JsonLinesSink {
    /// @ai:effects fs:write
    fn emit(&mut self, event: &RunEvent) {
        if let Err(e) = self.write_event(event) {
            tracing::warn!("Failed to write event to {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonLinesSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_events_written_one_per_line() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("events.jsonl");

        {
            let mut sink = JsonLinesSink::open(&path).unwrap();
            sink.emit(&RunEvent::RunStarted {
                subject: "ArangoDBBenchmark".to_string(),
            });
            sink.emit(&RunEvent::IterationTimed {
                subject: "ArangoDBBenchmark".to_string(),
                operation: "findMostConnectedNode".to_string(),
                iteration: 1,
                elapsed_ms: 7,
            });
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let events: Vec<RunEvent> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], RunEvent::IterationTimed { elapsed_ms: 7, .. }));
    }

    #[test]
    fn test_reopen_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");

        for _ in 0..2 {
            let mut sink = JsonLinesSink::open(&path).unwrap();
            sink.emit(&RunEvent::RunStarted {
                subject: "S".to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
