use std::process::ExitCode;
use zoom_recordings::cli::{self, handle_sql_command, SqlCliArgs};

fn main() -> ExitCode {
    let args: SqlCliArgs = cli::parse_args();
    cli::init_logging(args.verbose);
    cli::exit_code(handle_sql_command(args))
}
