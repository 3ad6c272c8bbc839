//! JSON rendering
//!
//! `serde_json` never escapes non-ASCII characters, so titles such as
//! `"Données"` are written literally. Object keys keep their input order
//! unless `sort_keys` is set.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;

/// How JSON documents are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFormat {
    /// Spaces per indentation level; `0` renders compact JSON
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Sort object keys recursively
    #[serde(default = "default_sort_keys")]
    pub sort_keys: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            sort_keys: default_sort_keys(),
        }
    }
}

fn default_indent() -> usize {
    4
}

fn default_sort_keys() -> bool {
    true
}

impl JsonFormat {
    /// Layout used for the saved datapackage file
    pub const DATAPACKAGE: Self = Self {
        indent: 4,
        sort_keys: false,
    };

    /// Render `value` as JSON text
    pub fn to_string<T: Serialize>(&self, value: &T) -> Result<String> {
        let mut value = serde_json::to_value(value)?;
        if self.sort_keys {
            sort_keys(&mut value);
        }

        if self.indent == 0 {
            return Ok(serde_json::to_string(&value)?);
        }

        let indent = " ".repeat(self.indent);
        let mut buf = Vec::new();
        let mut ser =
            Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        value.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.sort_keys();
            map.values_mut().for_each(sort_keys);
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}
