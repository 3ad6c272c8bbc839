//! Normalize the source description

use anyhow::{Context, Result};
use packager_core::{Parameters, create_datapackage};

/// Run the normalize command
pub fn run(
    config_path: &str,
    save: bool,
    source: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    let config = super::load_config(config_path, source, output)?;
    let parameters = Parameters {
        save_datapackage: save,
    };

    let emission =
        create_datapackage(&config, &parameters).context("Failed to create datapackage")?;

    let text = config
        .project
        .json_format
        .to_string(&emission.datapackage)
        .context("Failed to render datapackage")?;
    println!("{}", text);

    if !emission.warnings.is_empty() {
        tracing::warn!(
            "{} publication date(s) could not be parsed and were dropped",
            emission.warnings.len()
        );
    }

    Ok(())
}
