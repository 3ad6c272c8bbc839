//! CLI command implementations

pub mod init;
pub mod normalize;
pub mod validate;

use anyhow::{Context, Result};
use packager_core::Config;

/// Load the project configuration, applying command-line path overrides
pub(crate) fn load_config(
    config_path: &str,
    source: Option<&str>,
    output: Option<&str>,
) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load configuration")?;

    // Overrides are relative to the working directory, not the project
    if let Some(source) = source {
        config.project.source_file = std::env::current_dir()?.join(source);
    }
    if let Some(output) = output {
        config.project.datapackage_file = std::env::current_dir()?.join(output);
    }

    Ok(config)
}
