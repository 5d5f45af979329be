//! Fairgate: fair group mutual exclusion for two categories of threads.
//!
//! This is the main entry point for the `fairgate` CLI. It parses arguments,
//! installs diagnostic logging, dispatches to the appropriate command handler,
//! and handles errors with proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use fairgate::{exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result = logging::init(cli.log_level.as_deref())
        .and_then(|()| commands::dispatch(cli.command));

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
