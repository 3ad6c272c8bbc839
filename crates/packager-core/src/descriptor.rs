//! Package, resource, schema and field records
//!
//! Known properties are struct fields; everything else a source description
//! carries is kept verbatim (and in input order) in each record's `extra`
//! map, so it survives normalization untouched.
//!
//! # Example
//!
//! ```yaml
//! title: My Dataset
//! description: Yearly figures
//! resources:
//!   - title: Data A
//!     path: data/a.csv
//!     publication_date: 15/01/2020
//!     schema:
//!       fields:
//!         - name: "  Full   Name "
//!           type: integer
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value forced onto every field's `type`
pub const FIELD_TYPE: &str = "string";

/// Top-level datapackage record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Human-readable title
    pub title: String,

    /// Slug derived from `title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Any other top-level properties
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Data resources; the first one is the template for the rest
    pub resources: Vec<Resource>,
}

/// One data file's metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Slug derived from `title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Publication date; `YYYY-MM-DD` once normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<Value>,

    /// Any other resource properties (path, format, licenses, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Table schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Table schema of a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Column descriptors, in column order
    pub fields: Vec<Field>,

    /// Any other schema properties (primaryKey, missingValues, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One column descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Column name
    #[serde(default)]
    pub name: Option<Value>,

    /// Column type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<Value>,

    /// Any other field properties (title, description, format, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Field {
    /// Build a field with the given name and no other properties
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            field_type: None,
            extra: Map::new(),
        }
    }

    /// The field name, if it is text
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }
}

impl Resource {
    /// Label used in diagnostics: the title when known, else the position
    pub fn label(&self, index: usize) -> String {
        match &self.title {
            Some(title) => format!("resource '{}'", title),
            None => format!("resource #{}", index),
        }
    }
}

/// JavaScript-style truthiness of a JSON value.
///
/// `null`, `false`, zero, and empty strings, arrays and objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Remove every property whose value is falsy.
///
/// Only the given map is inspected; nested values are left as they are.
pub fn drop_empty_properties(map: &mut Map<String, Value>) {
    map.retain(|_, value| is_truthy(value));
}
