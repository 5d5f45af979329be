//! CLI argument parsing for fairgate.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use fairgate::gate::TurnstilePolicy;
use std::path::PathBuf;

/// Fairgate: two categories of threads share one resource, fairly.
///
/// Threads of the same category may use the resource together; threads of
/// different categories never overlap, and neither category can starve the
/// other.
#[derive(Parser, Debug)]
#[command(name = "fairgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Diagnostic log filter (e.g. "debug", "fairgate=trace"). RUST_LOG wins.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for fairgate.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a mixed population of both categories and verify the trace.
    ///
    /// Each participant waits a random delay, requests the resource, uses
    /// it for a while, and leaves. The run fails if the categories ever
    /// overlapped or a participant did not finish.
    Run(RunArgs),

    /// Run a fixed fairness scenario.
    Scenario(ScenarioCommand),

    /// Verify a previously written NDJSON trace.
    Verify(VerifyArgs),

    /// Print the effective run configuration as YAML.
    Config(ConfigArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// YAML config file. Flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of category A participants.
    #[arg(short = 'a', long)]
    pub participants_a: Option<usize>,

    /// Number of category B participants.
    #[arg(short = 'b', long)]
    pub participants_b: Option<usize>,

    /// Seed for arrival and usage durations.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Turnstile ordering policy.
    #[arg(long, value_enum)]
    pub turnstile: Option<TurnstilePolicy>,

    /// Write the NDJSON trace of the run to this file.
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Do not narrate steps on stdout.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Scenario subcommand wrapper.
#[derive(Parser, Debug)]
pub struct ScenarioCommand {
    #[command(subcommand)]
    pub scenario: Scenario,
}

/// Available scenarios.
#[derive(Subcommand, Debug)]
pub enum Scenario {
    /// One A holds the resource while B waiters queue, then more A arrive.
    ///
    /// Fails if any late A is admitted before every queued B.
    LongHolder(LongHolderArgs),
}

/// Arguments for `scenario long-holder`.
#[derive(Parser, Debug)]
pub struct LongHolderArgs {
    /// YAML config file; only its category labels are used here.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How long the first A holds the resource, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub hold_ms: u64,

    /// Number of B actors that queue behind the holder.
    #[arg(long, default_value_t = 3)]
    pub waiters: usize,

    /// Number of A actors that arrive after the waiters.
    #[arg(long, default_value_t = 3)]
    pub late: usize,

    /// How long each queued actor uses the resource, in milliseconds.
    #[arg(long, default_value_t = 50)]
    pub usage_ms: u64,

    /// Turnstile ordering policy.
    #[arg(long, value_enum, default_value_t = TurnstilePolicy::Fifo)]
    pub turnstile: TurnstilePolicy,

    /// Do not narrate steps on stdout.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `verify` command.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Path to an NDJSON trace written by `fairgate run --trace`.
    pub trace: PathBuf,

    /// Expected number of participants; defaults to the actors in the trace.
    #[arg(long)]
    pub expect: Option<usize>,
}

/// Arguments for the `config` command.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// YAML config file to load and validate.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
