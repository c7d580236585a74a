//! CLI handler for generating SQL from exported recordings.

use anyhow::Result;

use super::args::SqlCliArgs;
use crate::global;
use crate::sql::generate_sql_file;

pub fn handle_sql_command(args: SqlCliArgs) -> Result<()> {
    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None => global::output_dir()?,
    };

    let report = generate_sql_file(&args.input, args.zoom_id, &output_dir)?;

    println!(
        "Successfully generated SQL file: {}",
        report.output_path.display()
    );
    println!(
        "  Processed {} recording(s) from {} total",
        report.summary.acted, report.total_files
    );

    Ok(())
}
