//! Implementation of the `fairgate scenario` commands.

use super::display::print_summary;
use crate::cli::LongHolderArgs;
use fairgate::config::{CategoryLabels, SimConfig};
use fairgate::error::Result;
use fairgate::sim::{LongHolderParams, run_long_holder};
use std::time::Duration;

/// Category labels for narration: from the config file if given.
pub(super) fn resolve_labels(args: &LongHolderArgs) -> Result<CategoryLabels> {
    match &args.config {
        Some(path) => Ok(SimConfig::load(path)?.labels),
        None => Ok(CategoryLabels::default()),
    }
}

/// Execute `fairgate scenario long-holder`.
pub fn cmd_long_holder(args: LongHolderArgs) -> Result<()> {
    let labels = resolve_labels(&args)?;
    let params = LongHolderParams {
        hold: Duration::from_millis(args.hold_ms),
        waiters: args.waiters,
        late: args.late,
        usage: Duration::from_millis(args.usage_ms),
        turnstile: args.turnstile,
        labels: labels.clone(),
        echo: !args.quiet,
    };

    let report = run_long_holder(&params)?;

    print_summary("Long-Holder Scenario", &report.trace, &labels);
    println!("  Turnstile:   {}", params.turnstile);
    let order: Vec<String> = report
        .admission_order
        .iter()
        .map(|actor| format!("{} {}", labels.label(actor.category), actor.id))
        .collect();
    println!("  Admitted:    {}", order.join(", "));
    println!(
        "  Waiters first: {}",
        if report.waiters_admitted_first() {
            "yes"
        } else {
            "no"
        }
    );

    report.check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairgate::gate::TurnstilePolicy;
    use tempfile::TempDir;

    fn args(config: Option<std::path::PathBuf>) -> LongHolderArgs {
        LongHolderArgs {
            config,
            hold_ms: 50,
            waiters: 3,
            late: 3,
            usage_ms: 10,
            turnstile: TurnstilePolicy::Fifo,
            quiet: true,
        }
    }

    #[test]
    fn labels_default_without_config() {
        assert_eq!(resolve_labels(&args(None)).unwrap(), CategoryLabels::default());
    }

    #[test]
    fn labels_come_from_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fairgate.yaml");
        std::fs::write(&path, "labels:\n  a: Reader\n  b: Writer\n").unwrap();

        let labels = resolve_labels(&args(Some(path))).unwrap();
        assert_eq!(labels.a, "Reader");
        assert_eq!(labels.b, "Writer");
    }
}
