//! Implementation of the `fairgate run` command.

use super::display::print_summary;
use crate::cli::RunArgs;
use fairgate::config::SimConfig;
use fairgate::error::Result;
use fairgate::sim::run_simulation;

/// Load the config file (if any) and apply flag overrides on top.
pub(super) fn resolve_config(args: &RunArgs) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    if let Some(count) = args.participants_a {
        config.participants_a = count;
    }
    if let Some(count) = args.participants_b {
        config.participants_b = count;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(policy) = args.turnstile {
        config.turnstile = policy;
    }
    if let Some(path) = &args.trace {
        config.trace_path = Some(path.clone());
    }
    if args.quiet {
        config.echo = false;
    }

    config.validate()?;
    Ok(config)
}

/// Execute the `fairgate run` command.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let report = run_simulation(&config)?;

    if config.echo {
        println!("All threads completed execution.");
    }

    print_summary("Run Summary", &report.trace, &config.labels);
    println!("  Turnstile:   {}", config.turnstile);
    println!("  Elapsed:     {} ms", report.elapsed.as_millis());
    if let Some(path) = &config.trace_path {
        println!("  Trace:       {}", path.display());
    }

    report.check()
}
