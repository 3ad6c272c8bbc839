//! Validate the source description

use anyhow::{Context, Result};
use packager_core::normalize_with_report;
use packager_core::pipeline::load_description;

/// Run the validate command
pub fn run(config_path: &str) -> Result<()> {
    let config = super::load_config(config_path, None, None)?;
    let source = config.source_path();

    tracing::info!("Validating source description: {}", source.display());

    let description = load_description(&source).context("Failed to read source description")?;
    let normalized =
        normalize_with_report(description).context("Source description is not valid")?;
    let package = &normalized.package;

    tracing::info!(
        "✓ Package: {} ({})",
        package.title,
        package.name.as_deref().unwrap_or_default()
    );
    for resource in &package.resources {
        let fields = resource.schema.as_ref().map_or(0, |s| s.fields.len());
        tracing::info!(
            "✓ Resource: {} ({} fields)",
            resource.name.as_deref().unwrap_or_default(),
            fields
        );
    }

    if normalized.warnings.is_empty() {
        tracing::info!("✓ Description is valid");
    } else {
        for warning in &normalized.warnings {
            tracing::warn!(
                "✗ {}: publication_date '{}' will be dropped",
                warning.resource,
                warning.raw
            );
        }
        tracing::info!(
            "✓ Description is valid ({} warning(s))",
            normalized.warnings.len()
        );
    }

    Ok(())
}
