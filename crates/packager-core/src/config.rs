//! Configuration parsing and validation
//!
//! This module handles loading the `packager.yaml` project file, which tells
//! the pipeline where the source description lives, where the datapackage
//! is written, and how JSON output is formatted.
//!
//! # Example
//!
//! ```yaml
//! source_file: source/description.yaml
//! datapackage_file: source/datapackage.json
//! json_format:
//!   indent: 4
//!   sort_keys: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::output::JsonFormat;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "packager.yaml";

/// Project configuration from `packager.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Path to the source description (YAML)
    #[serde(default = "default_source_file")]
    pub source_file: PathBuf,

    /// Path the normalized datapackage is saved to
    #[serde(default = "default_datapackage_file")]
    pub datapackage_file: PathBuf,

    /// Formatting used when the datapackage is printed or logged
    #[serde(default)]
    pub json_format: JsonFormat,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_file: default_source_file(),
            datapackage_file: default_datapackage_file(),
            json_format: JsonFormat::default(),
        }
    }
}

fn default_source_file() -> PathBuf {
    PathBuf::from("source/description.yaml")
}

fn default_datapackage_file() -> PathBuf {
    PathBuf::from("source/datapackage.json")
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a directory
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the project directory or packager.yaml file
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./my-dataset")?;
    /// println!("Source: {}", config.source_path().display());
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let (config_path, base_path) = if path.is_dir() {
            (path.join(CONFIG_FILE_NAME), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let project: ProjectConfig = if contents.trim().is_empty() {
            ProjectConfig::default()
        } else {
            serde_yaml::from_str(&contents).map_err(Error::ConfigParse)?
        };

        let config = Self { project, base_path };
        config.validate()?;

        tracing::debug!(
            "Loaded configuration from {} (source: {})",
            config_path.display(),
            config.source_path().display()
        );

        Ok(config)
    }

    /// Build a configuration rooted at `base_path` without reading a file
    pub fn with_base_path<P: Into<PathBuf>>(project: ProjectConfig, base_path: P) -> Result<Self> {
        let config = Self {
            project,
            base_path: base_path.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Absolute (or base-relative) path of the source description
    pub fn source_path(&self) -> PathBuf {
        self.base_path.join(&self.project.source_file)
    }

    /// Absolute (or base-relative) path of the saved datapackage
    pub fn datapackage_path(&self) -> PathBuf {
        self.base_path.join(&self.project.datapackage_file)
    }

    fn validate(&self) -> Result<()> {
        if self.project.source_file.as_os_str().is_empty() {
            return Err(Error::ConfigInvalid {
                message: "source_file must not be empty".to_string(),
            });
        }
        if self.project.datapackage_file.as_os_str().is_empty() {
            return Err(Error::ConfigInvalid {
                message: "datapackage_file must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
source_file: meta/description.yaml
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.source_file, PathBuf::from("meta/description.yaml"));
        assert_eq!(
            config.datapackage_file,
            PathBuf::from("source/datapackage.json")
        );
        assert_eq!(config.json_format, JsonFormat::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
source_file: description.yml
datapackage_file: out/datapackage.json
json_format:
  indent: 2
  sort_keys: false
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.source_file, PathBuf::from("description.yml"));
        assert_eq!(config.datapackage_file, PathBuf::from("out/datapackage.json"));
        assert_eq!(config.json_format.indent, 2);
        assert!(!config.json_format.sort_keys);
    }

    #[test]
    fn test_load_from_dir_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "source_file: desc.yaml\ndatapackage_file: out/dp.json\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.source_path(), dir.path().join("desc.yaml"));
        assert_eq!(config.datapackage_path(), dir.path().join("out/dp.json"));
    }

    #[test]
    fn test_load_from_file_uses_parent_as_base() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&file, "").unwrap();

        let config = Config::load(&file).unwrap();
        assert_eq!(config.base_path, dir.path());
        assert_eq!(
            config.source_path(),
            dir.path().join("source/description.yaml")
        );
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path());
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "json_format: [1, 2").unwrap();
        let result = Config::load(dir.path());
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_empty_source_path_is_invalid() {
        let project = ProjectConfig {
            source_file: PathBuf::new(),
            ..Default::default()
        };
        let result = Config::with_base_path(project, ".");
        assert!(matches!(result, Err(Error::ConfigInvalid { .. })));
    }
}
