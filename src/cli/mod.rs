//! Entry points shared by the command-line tools.
//!
//! Each binary parses its own arguments, initialises logging, and hands off
//! to one `handle_*_command` function here.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

pub mod args;
pub mod check;
pub mod export;
pub mod sql;
pub mod trash;

pub use args::{CheckCliArgs, ExportCliArgs, SqlCliArgs, TrashCliArgs};
pub use check::handle_check_command;
pub use export::handle_export_command;
pub use sql::handle_sql_command;
pub use trash::handle_trash_command;

/// Parse arguments, exiting 0 for help/version and 1 for invalid input.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

/// Logs go to stderr so stdout carries only tool output.
pub fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load `.env` (if any) and build the run configuration.
pub fn load_config() -> Result<Config> {
    dotenvy::dotenv().ok();

    Config::from_env().map_err(|err| match err {
        ConfigError::MissingEnv(missing) => {
            let list = missing
                .iter()
                .map(|name| format!("   - {name}"))
                .collect::<Vec<_>>()
                .join("\n");
            anyhow!(
                "Missing environment variables:\n{}\nMake sure your .env file defines them.",
                list
            )
        }
        other => anyhow!(other),
    })
}

/// Map a handler result to the process exit code.
pub fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
