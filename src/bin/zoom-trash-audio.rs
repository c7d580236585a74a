use std::process::ExitCode;
use zoom_recordings::cli::{self, handle_trash_command, TrashCliArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let args: TrashCliArgs = cli::parse_args();
    cli::init_logging(args.verbose);
    cli::exit_code(handle_trash_command(args).await)
}
