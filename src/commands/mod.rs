//! Command implementations for fairgate.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod config_cmd;
mod display;
mod run;
mod scenario;
mod verify;

use crate::cli::{Command, Scenario};
use fairgate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Scenario(scenario_cmd) => match scenario_cmd.scenario {
            Scenario::LongHolder(args) => scenario::cmd_long_holder(args),
        },
        Command::Verify(args) => verify::cmd_verify(args),
        Command::Config(args) => config_cmd::cmd_config(args),
    }
}
