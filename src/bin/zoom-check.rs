use std::process::ExitCode;
use zoom_recordings::cli::{self, handle_check_command, CheckCliArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let args: CheckCliArgs = cli::parse_args();
    cli::init_logging(args.verbose);
    cli::exit_code(handle_check_command().await)
}
