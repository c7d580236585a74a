//! CLI handler for exporting recordings as JSON.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

use super::args::ExportCliArgs;
use super::load_config;
use crate::collector::collect_meetings;
use crate::export::RecordingsExport;
use crate::zoom::ZoomClient;

pub async fn handle_export_command(args: ExportCliArgs) -> Result<()> {
    let range = args.range()?;
    let config = load_config()?;

    info!("Fetching Zoom recordings for {}", range);

    let client = ZoomClient::connect(&config)
        .await
        .context("Failed to authenticate with Zoom")?;

    let spinner = create_spinner("Fetching recordings...");
    let collection = collect_meetings(&client, &range).await;
    spinner.finish_and_clear();
    let collection = collection.context("Failed to fetch recordings")?;

    let export = RecordingsExport::new(&range, collection);
    info!(
        "Total: {} meeting(s) over {} page(s)",
        export.total_records, export.page_count
    );

    let pretty = !args.compact;
    match &args.output {
        Some(path) => {
            export.write_to(path, pretty)?;
            eprintln!("JSON saved to: {}", path.display());
        }
        None => println!("{}", export.render(pretty)?),
    }

    Ok(())
}

fn create_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} ({elapsed})") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
