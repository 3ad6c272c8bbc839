//! Packager Core Library
//!
//! This crate turns a loosely-structured source description into a
//! datapackage descriptor:
//! - Configuration parsing and validation
//! - Typed package, resource, schema and field records
//! - Normalization (names, shared defaults, fields, dates)
//! - JSON output and pipeline stage wiring
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Description │────▶│ Normalizer  │────▶│ Datapackage │
//! │   (YAML)    │     │             │     │   (JSON)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use packager_core::{Config, Parameters, create_datapackage};
//!
//! let config = Config::load("./packager.yaml")?;
//! let emission = create_datapackage(&config, &Parameters { save_datapackage: true })?;
//! println!("Package: {:?}", emission.datapackage.name);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dates;
pub mod descriptor;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod slug;

pub use config::{Config, ProjectConfig};
pub use descriptor::{Field, Package, Resource, Schema};
pub use error::{Error, Result};
pub use normalize::{DateWarning, Normalized, normalize, normalize_with_report};
pub use output::JsonFormat;
pub use pipeline::{Emission, Parameters, create_datapackage};
