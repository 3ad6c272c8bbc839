//! Descriptor normalization
//!
//! Turns a raw source description into a datapackage descriptor:
//!
//! 1. falsy top-level properties are dropped
//! 2. the package `name` is derived from its `title`
//! 3. every resource is filled in from the first (template) resource
//! 4. each resource gets a `name` derived from its own `title`
//! 5. schema fields are cleaned and typed as `string`
//! 6. `publication_date` is rewritten as `YYYY-MM-DD`, or dropped with a
//!    warning when it cannot be parsed

use serde_json::{Map, Value};

use crate::dates::{DATE_FORMAT, PublicationDate, parse_publication_date};
use crate::descriptor::{FIELD_TYPE, Field, Package, Resource, drop_empty_properties, is_truthy};
use crate::error::{Error, Result};
use crate::slug::slugify;

/// A `publication_date` that could not be parsed and was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWarning {
    /// Resource the date belonged to
    pub resource: String,
    /// The value as found in the source description
    pub raw: String,
}

/// A normalized package together with the non-fatal problems found on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The normalized descriptor
    pub package: Package,
    /// Dates that were dropped
    pub warnings: Vec<DateWarning>,
}

/// Normalize a raw description into a datapackage descriptor.
pub fn normalize(raw: Map<String, Value>) -> Result<Package> {
    normalize_with_report(raw).map(|normalized| normalized.package)
}

/// Normalize a raw description, also returning the recorded warnings.
pub fn normalize_with_report(mut raw: Map<String, Value>) -> Result<Normalized> {
    drop_empty_properties(&mut raw);

    if !raw.contains_key("title") {
        return Err(Error::MissingProperty {
            record: "package".to_string(),
            property: "title".to_string(),
        });
    }
    if !raw.contains_key("resources") {
        return Err(Error::NoResources);
    }

    discard_derived_names(&mut raw);

    let mut package: Package =
        serde_json::from_value(Value::Object(raw)).map_err(|e| Error::InvalidDescription {
            message: e.to_string(),
        })?;

    package.name = Some(derive_name(&package.title)?);

    let template = package.resources.first().cloned().ok_or(Error::NoResources)?;

    let mut warnings = Vec::new();
    let resources = std::mem::take(&mut package.resources);
    for (index, resource) in resources.into_iter().enumerate() {
        let resource = propagate_defaults(&template, resource);
        package
            .resources
            .push(normalize_resource(resource, index, &mut warnings)?);
    }

    tracing::debug!(
        "Normalized package '{}' ({} resources, {} warnings)",
        package.title,
        package.resources.len(),
        warnings.len()
    );

    Ok(Normalized { package, warnings })
}

/// Remove incoming `name` properties from the package and its resources.
///
/// Names are always derived from titles, so whatever the source says is
/// never read.
fn discard_derived_names(raw: &mut Map<String, Value>) {
    raw.remove("name");
    if let Some(Value::Array(resources)) = raw.get_mut("resources") {
        for resource in resources.iter_mut().filter_map(Value::as_object_mut) {
            resource.remove("name");
        }
    }
}

/// Fill every property `template` has and `target` lacks.
///
/// Properties already on `target` are never overwritten. Copied values are
/// deep clones, so the two resources stay independent.
pub fn propagate_defaults(template: &Resource, mut target: Resource) -> Resource {
    target.title = target.title.or_else(|| template.title.clone());
    target.name = target.name.or_else(|| template.name.clone());
    target.publication_date = target
        .publication_date
        .or_else(|| template.publication_date.clone());
    target.schema = target.schema.or_else(|| template.schema.clone());

    for (key, value) in &template.extra {
        target
            .extra
            .entry(key.clone())
            .or_insert_with(|| value.clone());
    }
    target
}

/// Derive a `name` from a title.
pub fn derive_name(title: &str) -> Result<String> {
    let name = slugify(&title.to_lowercase());
    if name.is_empty() {
        return Err(Error::EmptyName {
            title: title.to_string(),
        });
    }
    Ok(name)
}

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean every field in place; order and count are preserved.
pub fn clean_fields(fields: &mut [Field], resource: &str) -> Result<()> {
    for (index, field) in fields.iter_mut().enumerate() {
        let record = || format!("field #{} of {}", index, resource);

        drop_empty_properties(&mut field.extra);

        let name = match field.name.take().filter(is_truthy) {
            Some(Value::String(s)) => collapse_whitespace(&s),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(Error::InvalidDescription {
                    message: format!("{} has a non-text name: {}", record(), other),
                });
            }
            None => String::new(),
        };
        if name.is_empty() {
            return Err(Error::MissingProperty {
                record: record(),
                property: "name".to_string(),
            });
        }

        field.name = Some(Value::String(name));
        field.field_type = Some(Value::String(FIELD_TYPE.to_string()));
    }
    Ok(())
}

fn normalize_resource(
    mut resource: Resource,
    index: usize,
    warnings: &mut Vec<DateWarning>,
) -> Result<Resource> {
    let label = resource.label(index);

    let title = resource
        .title
        .as_deref()
        .ok_or_else(|| Error::MissingProperty {
            record: label.clone(),
            property: "title".to_string(),
        })?;
    resource.name = Some(derive_name(title)?);

    let schema = resource
        .schema
        .as_mut()
        .ok_or_else(|| Error::MissingProperty {
            record: label.clone(),
            property: "schema".to_string(),
        })?;
    clean_fields(&mut schema.fields, &label)?;

    if let Some(raw) = resource.publication_date.take() {
        match parse_publication_date(&raw) {
            PublicationDate::Parsed(date) => {
                resource.publication_date =
                    Some(Value::String(date.format(DATE_FORMAT).to_string()));
            }
            PublicationDate::Unparseable(text) => {
                tracing::warn!("Could not parse date = {} ({})", text, label);
                warnings.push(DateWarning {
                    resource: label,
                    raw: text,
                });
            }
        }
    }

    Ok(resource)
}
