//! Implementation of the `fairgate verify` command.

use super::display::print_summary;
use crate::cli::VerifyArgs;
use fairgate::config::CategoryLabels;
use fairgate::error::{FairgateError, Result};
use fairgate::sim::{read_ndjson, verify_trace};

/// Execute the `fairgate verify` command.
///
/// Re-checks a stored trace: per-actor step order, no overlap between
/// categories, and (with `--expect`) the number of completed participants.
pub fn cmd_verify(args: VerifyArgs) -> Result<()> {
    let events = read_ndjson(&args.trace)?;
    let report = verify_trace(&events);

    print_summary(
        &format!("Trace {}", args.trace.display()),
        &report,
        &CategoryLabels::default(),
    );

    if !report.is_clean() {
        return Err(FairgateError::VerificationError(format!(
            "{} violation(s) in '{}'",
            report.violations.len(),
            args.trace.display()
        )));
    }

    let expected = args.expect.unwrap_or_else(|| report.actors());
    if report.completed() != expected {
        return Err(FairgateError::VerificationError(format!(
            "{} of {} participants completed",
            report.completed(),
            expected
        )));
    }

    Ok(())
}
