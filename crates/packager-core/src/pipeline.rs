//! Pipeline stage wiring
//!
//! Reads the configured source description, normalizes it, optionally saves
//! the datapackage, and hands the result to the next stage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::config::Config;
use crate::descriptor::Package;
use crate::error::{Error, Result};
use crate::normalize::{DateWarning, normalize_with_report};
use crate::output::JsonFormat;

/// Invocation parameters supplied by the surrounding pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Also write the datapackage to the configured file
    #[serde(default)]
    pub save_datapackage: bool,
}

/// What this stage hands downstream
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// The normalized descriptor
    pub datapackage: Package,

    /// Row streams per resource. This stage produces no rows, so it is always
    /// a single empty stream.
    pub resource_streams: Vec<Vec<Value>>,

    /// Dates that were dropped during normalization
    pub warnings: Vec<DateWarning>,
}

/// Read a source description file into a property map.
pub fn load_description<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::DescriptionNotFound {
            path: path.display().to_string(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let document: Value = serde_yaml::from_str(&contents).map_err(Error::DescriptionParse)?;

    match document {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidDescription {
            message: format!(
                "{} must contain a mapping at the top level, found {}",
                path.display(),
                kind_of(&other)
            ),
        }),
    }
}

/// Write the datapackage as 4-space indented JSON.
pub fn save_datapackage<P: AsRef<Path>>(path: P, datapackage: &Package) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut text = JsonFormat::DATAPACKAGE.to_string(datapackage)?;
    text.push('\n');
    std::fs::write(path, text)?;

    tracing::info!("Saved datapackage to {}", path.display());
    Ok(())
}

/// Convert the configured source description into a datapackage.
pub fn create_datapackage(config: &Config, parameters: &Parameters) -> Result<Emission> {
    let source = config.source_path();
    tracing::info!("Reading source description from {}", source.display());

    let description = load_description(&source)?;
    let normalized = normalize_with_report(description)?;

    if parameters.save_datapackage {
        save_datapackage(config.datapackage_path(), &normalized.package)?;
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        let dump = config.project.json_format.to_string(&normalized.package)?;
        tracing::debug!("Datapackage: \n{}", dump);
    }

    Ok(Emission {
        datapackage: normalized.package,
        resource_streams: vec![vec![]],
        warnings: normalized.warnings,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
