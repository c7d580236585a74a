//! Moves selected recording files to the Zoom trash.
//!
//! Each file is addressed by meeting UUID first. When Zoom cannot resolve the
//! UUID (error 3301) and the meeting has a numeric id, the request is retried
//! once with the numeric id. The decision is made by [`next_action`], which
//! does no I/O; [`trash_files`] drives it against a [`RecordingsApi`].
//!
//! Only the trash action is ever requested. Trashed recordings stay
//! recoverable for the account's retention window.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::io::{self, Write};
use tracing::{info, warn};

use crate::report::RunSummary;
use crate::zoom::{Meeting, MeetingRef, RecordingFile, RecordingsApi};

/// Zoom error code for a meeting UUID it cannot resolve.
pub const UUID_NOT_FOUND_CODE: i64 = 3301;

/// Simulation is the default; nothing is sent to Zoom in that mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrashMode {
    #[default]
    DryRun,
    Trash,
}

/// Which meeting identifier a request used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashTarget {
    Uuid,
    MeetingId,
}

/// Result of the previous request for the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastAttempt {
    Succeeded(TrashTarget),
    Failed {
        target: TrashTarget,
        code: Option<i64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashAction {
    Attempt(TrashTarget),
    Succeeded(TrashTarget),
    Failed,
}

/// Decide what to do next for one file.
pub fn next_action(has_uuid: bool, has_id: bool, last: Option<LastAttempt>) -> TrashAction {
    match last {
        None if has_uuid => TrashAction::Attempt(TrashTarget::Uuid),
        None if has_id => TrashAction::Attempt(TrashTarget::MeetingId),
        None => TrashAction::Failed,
        Some(LastAttempt::Succeeded(target)) => TrashAction::Succeeded(target),
        Some(LastAttempt::Failed {
            target: TrashTarget::Uuid,
            code: Some(UUID_NOT_FOUND_CODE),
        }) if has_id => TrashAction::Attempt(TrashTarget::MeetingId),
        Some(LastAttempt::Failed { .. }) => TrashAction::Failed,
    }
}

/// Final state of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashOutcome {
    DryRun,
    Trashed(TrashTarget),
    Failed,
}

/// Describe, and in [`TrashMode::Trash`] trash, every selected file.
///
/// A failure on one file is reported and counted; the batch always runs to
/// the end. Progress lines are written to `out`. If `out` stops accepting
/// writes (a closed pipe, say), a warning is logged once and the remaining
/// files are still processed without progress output.
pub async fn trash_files<A, W>(
    api: &A,
    files: &[(&Meeting, &RecordingFile)],
    mode: TrashMode,
    out: &mut W,
) -> Result<RunSummary>
where
    A: RecordingsApi + ?Sized,
    W: Write,
{
    let mut summary = RunSummary::default();
    let out = &mut ProgressWriter::new(out);

    for (meeting, file) in files {
        summary.record_match();
        writeln!(out, "{}", describe_file(meeting, file, &Local))
            .context("Failed to write output")?;

        match trash_file(api, meeting, file, mode, out).await? {
            TrashOutcome::DryRun => {}
            TrashOutcome::Trashed(_) => summary.record_success(),
            TrashOutcome::Failed => {
                summary.record_failure();
                writeln!(out, "   Skipping to next file...").context("Failed to write output")?;
            }
        }
    }

    Ok(summary)
}

/// Forwards progress lines until the first write error, then drops them.
struct ProgressWriter<'a, W> {
    inner: &'a mut W,
    broken: bool,
}

impl<'a, W: Write> ProgressWriter<'a, W> {
    fn new(inner: &'a mut W) -> Self {
        Self {
            inner,
            broken: false,
        }
    }
}

impl<W: Write> Write for ProgressWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.broken {
            if let Err(err) = self.inner.write_all(buf) {
                warn!("Progress output unavailable, continuing without it: {}", err);
                self.broken = true;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.broken && self.inner.flush().is_err() {
            self.broken = true;
        }
        Ok(())
    }
}

/// Run the attempt sequence for one file.
pub async fn trash_file<A, W>(
    api: &A,
    meeting: &Meeting,
    file: &RecordingFile,
    mode: TrashMode,
    out: &mut W,
) -> Result<TrashOutcome>
where
    A: RecordingsApi + ?Sized,
    W: Write,
{
    if mode == TrashMode::DryRun {
        writeln!(out, "   DRY-RUN: no action").context("Failed to write output")?;
        return Ok(TrashOutcome::DryRun);
    }

    let Some(file_id) = file.id.as_deref().filter(|id| !id.is_empty()) else {
        warn!("Recording file without an id in meeting {:?}", meeting.id);
        writeln!(out, "   Recording file has no id, cannot trash").context("Failed to write output")?;
        return Ok(TrashOutcome::Failed);
    };

    let uuid = meeting.uuid();
    let mut last = None;

    loop {
        let target = match next_action(uuid.is_some(), meeting.id.is_some(), last) {
            TrashAction::Attempt(target) => target,
            TrashAction::Succeeded(target) => return Ok(TrashOutcome::Trashed(target)),
            TrashAction::Failed => {
                if last.is_none() {
                    writeln!(out, "   Meeting has neither a UUID nor an id, cannot trash")
                        .context("Failed to write output")?;
                }
                return Ok(TrashOutcome::Failed);
            }
        };

        let meeting_ref = match (target, uuid, meeting.id) {
            (TrashTarget::Uuid, Some(uuid), _) => MeetingRef::Uuid(uuid),
            (TrashTarget::MeetingId, _, Some(id)) => MeetingRef::Id(id),
            _ => return Ok(TrashOutcome::Failed),
        };

        match api.trash_recording_file(meeting_ref, file_id).await {
            Ok(()) => {
                info!("Trashed recording file {} via {:?}", file_id, meeting_ref);
                writeln!(out, "   Moved to trash ({})", target_label(target))
                    .context("Failed to write output")?;
                last = Some(LastAttempt::Succeeded(target));
            }
            Err(err) => {
                let code = err.code();
                warn!(
                    "Trashing recording file {} via {:?} failed: {}",
                    file_id, meeting_ref, err
                );
                writeln!(
                    out,
                    "   Failed ({}, code {}): {}",
                    target_label(target),
                    code.map(|c| c.to_string()).unwrap_or_else(|| "n/a".to_string()),
                    err
                )
                .context("Failed to write output")?;

                last = Some(LastAttempt::Failed { target, code });
                if let TrashAction::Attempt(TrashTarget::MeetingId) =
                    next_action(uuid.is_some(), meeting.id.is_some(), last)
                {
                    writeln!(out, "   Retrying with numeric meeting id...")
                        .context("Failed to write output")?;
                }
            }
        }
    }
}

fn target_label(target: TrashTarget) -> &'static str {
    match target {
        TrashTarget::Uuid => "by UUID",
        TrashTarget::MeetingId => "by numeric meeting id",
    }
}

/// One human-readable line per selected file.
pub fn describe_file<Tz>(meeting: &Meeting, file: &RecordingFile, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} | Meeting ID: {} | UUID: {} | Meeting: \"{}\" | Date: {} | File ID: {}",
        file.kind().as_str(),
        meeting
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        meeting.uuid().unwrap_or("N/A"),
        meeting.topic,
        format_recording_start(file.recording_start.as_deref(), tz),
        file.id.as_deref().unwrap_or("N/A"),
    )
}

/// `dd/mm/YYYY HH:MM` in `tz`; unparseable values are shown as-is.
pub fn format_recording_start<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return "N/A".to_string();
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|start| start.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
