use std::process::ExitCode;
use zoom_recordings::cli::{self, handle_export_command, ExportCliArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let args: ExportCliArgs = cli::parse_args();
    cli::init_logging(args.verbose);
    cli::exit_code(handle_export_command(args).await)
}
