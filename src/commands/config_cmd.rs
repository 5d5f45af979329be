//! Implementation of the `fairgate config` command.

use crate::cli::ConfigArgs;
use fairgate::config::SimConfig;
use fairgate::error::Result;

/// Print the effective configuration as YAML.
///
/// Without `--config` this prints the defaults, which makes a convenient
/// starting point for a config file.
pub fn cmd_config(args: ConfigArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    print!("{}", config.to_yaml()?);
    Ok(())
}
