//! Initialize a new Packager project

use anyhow::Result;
use packager_core::config::CONFIG_FILE_NAME;
use std::fs;
use std::path::Path;

/// Run the init command
pub fn run(path: &str, title: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    // Create directory if it doesn't exist
    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    // Get absolute path for deriving the title
    let abs_path = project_dir.canonicalize()?;

    // Derive dataset title from directory name if not provided
    let title = match title {
        Some(t) => t.to_string(),
        None => abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Could not determine a title from path"))?,
    };

    // Check if already initialized
    if project_dir.join(CONFIG_FILE_NAME).exists() {
        anyhow::bail!(
            "Directory '{}' already contains a {}",
            project_dir.display(),
            CONFIG_FILE_NAME
        );
    }

    tracing::info!("Creating new Packager project: {}", title);

    fs::create_dir_all(project_dir.join("source"))?;

    let config = r#"# Packager Project Configuration
source_file: source/description.yaml
datapackage_file: source/datapackage.json

# Layout of the datapackage printed by `packager normalize`
json_format:
  indent: 4
  sort_keys: true
"#;
    fs::write(project_dir.join(CONFIG_FILE_NAME), config)?;

    let description_path = project_dir.join("source/description.yaml");
    if description_path.exists() {
        tracing::info!("Keeping existing {}", description_path.display());
    } else {
        // JSON string escapes are valid inside a YAML double-quoted scalar
        let quoted_title = serde_json::to_string(&title)?;
        let description = format!(
            r#"# Source description
title: {quoted_title}
description: ""

resources:
  # The first resource is the template: properties it has and later
  # resources lack are copied over.
  - title: Example Data
    path: data/example.csv
    format: csv
    encoding: utf-8
    publication_date: "2024-01-15"
    schema:
      fields:
        - name: Identifier
          type: integer
        - name: "Full   Name"
          description: ""
"#
        );
        fs::write(&description_path, description)?;
    }

    tracing::info!("✓ Created project '{}' at {}", title, abs_path.display());
    tracing::info!("");
    tracing::info!("Next steps:");
    if path != "." {
        tracing::info!("  cd {}", project_dir.display());
    }
    tracing::info!("  packager validate             # Check the description");
    tracing::info!("  packager normalize --save     # Write the datapackage");

    Ok(())
}
