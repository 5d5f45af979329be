//! Diagnostic logging setup.
//!
//! Diagnostics go through `tracing` to stderr. Narration of a run goes to
//! stdout separately, so the two never interleave on the same stream.

use crate::error::{FairgateError, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter: `RUST_LOG` wins, then `level`, then [`DEFAULT_LEVEL`].
pub fn env_filter(level: Option<&str>) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL)).map_err(|e| {
            FairgateError::UserError(format!(
                "invalid log level '{}': {}",
                level.unwrap_or(DEFAULT_LEVEL),
                e
            ))
        }),
    }
}

/// Install the global subscriber.
///
/// A second call is a no-op, so tests and embedding programs may call it freely.
pub fn init(level: Option<&str>) -> Result<()> {
    let filter = env_filter(level)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init(Some("debug")).unwrap();
        init(Some("info")).unwrap();
        tracing::debug!("logging initialized twice");
    }

    #[test]
    fn accepts_module_directives() {
        assert!(env_filter(Some("fairgate=debug,warn")).is_ok());
    }
}
