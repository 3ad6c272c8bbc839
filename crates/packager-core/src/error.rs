//! Error types for packager-core

use thiserror::Error;

/// Result type alias for packager-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in packager-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[source] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Source description file could not be found
    #[error("source description not found: {path}")]
    DescriptionNotFound {
        /// Path that was searched
        path: String,
    },

    /// Source description is not valid YAML
    #[error("failed to parse source description: {0}")]
    DescriptionParse(#[source] serde_yaml::Error),

    /// A required property is missing from a record
    #[error("{record} is missing required property '{property}'")]
    MissingProperty {
        /// Record the property belongs to (e.g. `package`, `resource 'Data A'`)
        record: String,
        /// Name of the missing property
        property: String,
    },

    /// The package declares no resources, so there is no template resource
    #[error("package has no resources")]
    NoResources,

    /// A title slugifies to an empty name
    #[error("title '{title}' does not produce a usable name")]
    EmptyName {
        /// The offending title
        title: String,
    },

    /// The description has the wrong shape
    #[error("invalid description: {message}")]
    InvalidDescription {
        /// Description of what's invalid
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered output was not valid UTF-8
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error comes from the content of the source description
    /// rather than from the filesystem or configuration.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingProperty { .. }
                | Self::NoResources
                | Self::EmptyName { .. }
                | Self::InvalidDescription { .. }
                | Self::DescriptionParse(_)
        )
    }
}
