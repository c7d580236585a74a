//! CLI handler for trashing audio-only recordings.

use anyhow::{Context, Result};
use std::io;

use super::args::TrashCliArgs;
use super::load_config;
use crate::classifier::RecordingFilter;
use crate::collector::collect_meetings;
use crate::report::SummaryLabels;
use crate::trash::{trash_files, TrashMode};
use crate::zoom::{RecordingType, ZoomClient};

pub async fn handle_trash_command(args: TrashCliArgs) -> Result<()> {
    let range = args.range()?;
    let mode = args.mode();
    let config = load_config()?;

    println!(
        "Mode: {}",
        match mode {
            TrashMode::DryRun => "DRY-RUN (simulation)",
            TrashMode::Trash => "TRASH (files will be moved to the trash)",
        }
    );
    println!("Period: {}\n", range);

    let client = ZoomClient::connect(&config)
        .await
        .context("Failed to authenticate with Zoom")?;
    let collection = collect_meetings(&client, &range)
        .await
        .context("Failed to fetch recordings")?;

    let selected =
        RecordingFilter::Only(RecordingType::AudioOnly).select_from_meetings(&collection.meetings);

    let mut stdout = io::stdout();
    let summary = trash_files(&client, &selected, mode, &mut stdout).await?;

    let labels = SummaryLabels::new(
        "audio_only files found",
        "files moved to trash",
        "errors",
    );
    println!("\n{}", summary.display(&labels));

    Ok(())
}
