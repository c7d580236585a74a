use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, ConfigError, DateRange};
use crate::trash::TrashMode;

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    config::parse_date(raw).map_err(|err| err.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "zoom-export")]
#[command(about = "Export Zoom cloud recordings for a date range as JSON", long_about = None)]
#[command(after_help = "Examples:
  zoom-export --from 2025-10-06 --to 2025-10-07
  zoom-export -f 2025-10-06 -t 2025-10-07 --output recordings.json
  zoom-export -f 2025-10-06 -t 2025-10-07 --compact")]
pub struct ExportCliArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE", value_parser = parse_date_arg)]
    pub from: NaiveDate,
    /// End date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE", value_parser = parse_date_arg)]
    pub to: NaiveDate,
    /// Save the JSON to a file instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Print the JSON on a single line
    #[arg(long)]
    pub compact: bool,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportCliArgs {
    pub fn range(&self) -> Result<DateRange, ConfigError> {
        DateRange::new(self.from, self.to)
    }
}

#[derive(Parser, Debug)]
#[command(name = "zoom-trash-audio")]
#[command(about = "Move audio-only Zoom cloud recordings to the trash", long_about = None)]
#[command(after_help = "Examples:
  zoom-trash-audio --from 2025-10-06 --to 2025-10-07
  zoom-trash-audio -f 2025-10-06 -t 2025-10-07 --no-dry-run")]
pub struct TrashCliArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE", value_parser = parse_date_arg)]
    pub from: NaiveDate,
    /// End date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE", value_parser = parse_date_arg)]
    pub to: NaiveDate,
    /// Only list matching files (default)
    #[arg(long, overrides_with = "no_dry_run")]
    pub dry_run: bool,
    /// Move matching files to the trash
    #[arg(long, overrides_with = "dry_run")]
    pub no_dry_run: bool,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl TrashCliArgs {
    pub fn range(&self) -> Result<DateRange, ConfigError> {
        DateRange::new(self.from, self.to)
    }

    pub fn mode(&self) -> TrashMode {
        if self.no_dry_run {
            TrashMode::Trash
        } else {
            TrashMode::DryRun
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "zoom-sql")]
#[command(about = "Generate SQL INSERT statements from exported recording JSON", long_about = None)]
#[command(after_help = "Examples:
  zoom-sql input.json --zoomid=43
  zoom-sql input.json -z 43")]
pub struct SqlCliArgs {
    /// Recording JSON (one meeting with recording_files, or a zoom-export document)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Numeric Zoom id written to every row
    #[arg(short = 'z', long = "zoomid", value_name = "ID")]
    pub zoom_id: i64,
    /// Output directory [default: outputfiles/ next to the executable]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "zoom-check")]
#[command(about = "Check Zoom API credentials and connectivity", long_about = None)]
pub struct CheckCliArgs {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
