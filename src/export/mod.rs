//! JSON snapshot of everything collected for a date range.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::collector::Collection;
use crate::config::DateRange;
use crate::zoom::Meeting;

/// Document written by the export tool and read back by the SQL generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingsExport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_records: usize,
    pub page_count: u32,
    pub meetings: Vec<Meeting>,
}

impl RecordingsExport {
    pub fn new(range: &DateRange, collection: Collection) -> Self {
        Self {
            from: range.from,
            to: range.to,
            total_records: collection.meetings.len(),
            page_count: collection.page_count,
            meetings: collection.meetings,
        }
    }

    /// Pretty output uses two-space indentation; compact is a single line.
    pub fn render(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("Failed to serialize recordings export")
    }

    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse recordings export")
    }

    /// Write the rendered document to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path, pretty: bool) -> Result<()> {
        let rendered = self.render(pretty)?;
        std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write export to {}", path.display()))
    }
}
