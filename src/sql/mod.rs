//! Turns exported recording JSON into INSERT statements for the
//! `prefix_zoom_meeting_recordings` table.
//!
//! No database connection is made; the statements are written to a file for
//! execution elsewhere.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::classifier::{RecordingFilter, SQL_RECORDING_TYPES};
use crate::report::RunSummary;
use crate::zoom::{Meeting, RecordingFile};

pub const TABLE_NAME: &str = "prefix_zoom_meeting_recordings";

const UNKNOWN_MEETING: &str = "Unknown Meeting";

#[derive(Debug, Deserialize)]
struct MeetingsDocument {
    meetings: Vec<Meeting>,
}

/// Meetings contained in an input document.
///
/// Accepts either a single meeting object carrying a `recording_files` array,
/// or a full export document with a `meetings` array.
pub fn parse_input(json: &str) -> Result<Vec<Meeting>> {
    let value: Value = serde_json::from_str(json).context("Failed to parse JSON input")?;

    if value.get("meetings").is_some_and(Value::is_array) {
        let document: MeetingsDocument =
            serde_json::from_value(value).context("Failed to read meetings from export")?;
        return Ok(document.meetings);
    }

    if value.get("recording_files").is_some_and(Value::is_array) {
        let meeting: Meeting =
            serde_json::from_value(value).context("Failed to read meeting recording files")?;
        return Ok(vec![meeting]);
    }

    bail!("JSON input must contain a \"recording_files\" array")
}

/// Statements generated for one input document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlBatch {
    pub statements: Vec<String>,
    /// Recording files seen, before filtering.
    pub total_files: usize,
}

impl SqlBatch {
    /// Statements separated by a blank line. Empty when nothing matched.
    pub fn content(&self) -> String {
        self.statements.join("\n\n")
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// One commented INSERT per whitelisted recording file, in input order.
pub fn build_batch(meetings: &[Meeting], zoom_id: i64) -> SqlBatch {
    let filter = RecordingFilter::AnyOf(SQL_RECORDING_TYPES);

    let statements = filter
        .select_from_meetings(meetings)
        .into_iter()
        .map(|(meeting, file)| {
            format!(
                "{}\n{}",
                comment_line(meeting, file),
                insert_statement(meeting, file, zoom_id)
            )
        })
        .collect();

    SqlBatch {
        statements,
        total_files: meetings.iter().map(|m| m.recording_files.len()).sum(),
    }
}

pub fn comment_line(meeting: &Meeting, file: &RecordingFile) -> String {
    let name = if meeting.topic.is_empty() {
        UNKNOWN_MEETING
    } else {
        meeting.topic.as_str()
    };
    format!(
        "-- Recording: {} | Type: {}",
        single_line(&escape_sql(name)),
        file.kind().as_str()
    )
}

/// File-level playback URL and passcode win over the meeting-level ones.
pub fn insert_statement(meeting: &Meeting, file: &RecordingFile, zoom_id: i64) -> String {
    let meeting_uuid = escape_sql(meeting.uuid.as_deref().unwrap_or(""));
    let recording_id = escape_sql(file.id.as_deref().unwrap_or(""));
    let name = escape_sql(&meeting.topic);
    let external_url = escape_sql(
        file.play_url
            .as_deref()
            .or(meeting.play_url.as_deref())
            .unwrap_or(""),
    );
    let passcode = escape_sql(
        file.passcode
            .as_deref()
            .or(meeting.recording_play_passcode.as_deref())
            .unwrap_or(""),
    );
    let recording_type = escape_sql(file.recording_type.as_deref().unwrap_or(""));
    let recording_start = unix_timestamp_expr(file.recording_start.as_deref());

    format!(
        "INSERT INTO {TABLE_NAME} (
  zoomid,
  meetinguuid,
  zoomrecordingid,
  name,
  externalurl,
  passcode,
  recordingtype,
  recordingstart,
  showrecording,
  timecreated,
  timemodified
)
VALUES (
  {zoom_id},
  '{meeting_uuid}',
  '{recording_id}',
  '{name}',
  '{external_url}',
  '{passcode}',
  '{recording_type}',
  {recording_start},
  1,
  UNIX_TIMESTAMP(),
  UNIX_TIMESTAMP()
);"
    )
}

/// `UNIX_TIMESTAMP('<iso>')`, or `UNIX_TIMESTAMP()` (now) when absent.
pub fn unix_timestamp_expr(iso: Option<&str>) -> String {
    match iso.filter(|value| !value.is_empty()) {
        Some(value) => format!("UNIX_TIMESTAMP('{}')", escape_sql(value)),
        None => "UNIX_TIMESTAMP()".to_string(),
    }
}

/// Escape a value for a single-quoted MySQL string literal.
///
/// Quotes and backslashes are doubled. Values are otherwise trusted.
pub fn escape_sql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "''")
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// `<dir>/output_<input stem>.sql`
pub fn output_path(input: &Path, dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    dir.join(format!("output_{stem}.sql"))
}

/// What a generation run wrote.
#[derive(Debug, Clone)]
pub struct SqlReport {
    pub output_path: PathBuf,
    pub total_files: usize,
    pub summary: RunSummary,
}

/// Read `input`, generate statements, and write them under `output_dir`.
///
/// The output file is written only after every statement has been built.
/// An input with no whitelisted recordings still produces an (empty) file.
pub fn generate_sql_file(input: &Path, zoom_id: i64, output_dir: &Path) -> Result<SqlReport> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let meetings = parse_input(&content)?;
    let batch = build_batch(&meetings, zoom_id);

    if batch.is_empty() {
        warn!("No valid recording files found (filtered by recording_type)");
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let output_path = output_path(input, output_dir);
    std::fs::write(&output_path, batch.content())
        .with_context(|| format!("Failed to write SQL file {}", output_path.display()))?;

    info!(
        "Wrote {} statement(s) to {}",
        batch.statements.len(),
        output_path.display()
    );

    Ok(SqlReport {
        output_path,
        total_files: batch.total_files,
        summary: RunSummary {
            matched: batch.statements.len(),
            acted: batch.statements.len(),
            failed: 0,
        },
    })
}
