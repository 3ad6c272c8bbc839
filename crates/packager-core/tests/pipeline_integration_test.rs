//! Integration tests for the complete description processing pipeline
//!
//! Tests use temporary directories with real file fixtures to verify:
//! - Project config loading and path resolution
//! - Normalization of a realistic multi-resource description
//! - Shared-default propagation from the template resource
//! - Saved datapackage layout
//! - Error handling for broken descriptions

use packager_core::{Config, Error, JsonFormat, Parameters, create_datapackage};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Helper to create a temporary project with a config and a description.
///
/// Returns a `TempDir` that automatically cleans up when dropped.
fn setup_project(description: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("source")).unwrap();
    std::fs::write(
        dir.path().join("packager.yaml"),
        r#"
source_file: source/description.yaml
datapackage_file: build/datapackage.json
json_format:
  indent: 2
  sort_keys: true
"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("source/description.yaml"), description).unwrap();
    dir
}

const MUNICIPAL_BUDGET: &str = r#"
title: "Municipal Budget: São Paulo"
description: Approved and executed budget lines
keywords: []
version: ""
licenses:
  - name: CC-BY-4.0
resources:
  - title: Approved Budget 2019
    path: data/approved-2019.csv
    format: csv
    encoding: utf-8
    publication_date: "March 5, 2019"
    schema:
      fields:
        - name: "Budget   line"
          type: integer
          description: ""
        - name: "Amount (BRL)\t"
          type: number
          format: currency
  - title: Executed Budget 2019
    path: data/executed-2019.csv
    encoding: latin-1
    publication_date: 2020/01/31
  - title: Notes
    path: data/notes.csv
    publication_date: "Q4"
    schema:
      fields:
        - name: Note
"#;

// =============================================================================
// Complete Pipeline Tests
// =============================================================================

#[test]
fn test_complete_pipeline() {
    let dir = setup_project(MUNICIPAL_BUDGET);
    let config = Config::load(dir.path()).unwrap();

    let emission = create_datapackage(&config, &Parameters::default()).unwrap();
    let package = serde_json::to_value(&emission.datapackage).unwrap();

    assert_eq!(package["name"], "municipal-budget-sao-paulo");
    assert_eq!(package["description"], "Approved and executed budget lines");
    assert!(package.get("keywords").is_none());
    assert!(package.get("version").is_none());
    assert_eq!(package["licenses"], json!([{"name": "CC-BY-4.0"}]));

    let resources = package["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 3);

    let names: Vec<&str> = resources
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["approved-budget-2019", "executed-budget-2019", "notes"]
    );

    assert_eq!(resources[0]["publication_date"], "2019-03-05");
    assert_eq!(resources[1]["publication_date"], "2020-01-31");
    assert!(resources[2].get("publication_date").is_none());

    assert_eq!(
        resources[0]["schema"]["fields"],
        json!([
            {"name": "Budget line", "type": "string"},
            {"name": "Amount (BRL)", "type": "string", "format": "currency"}
        ])
    );

    assert_eq!(emission.warnings.len(), 1);
    assert_eq!(emission.warnings[0].resource, "resource 'Notes'");
    assert_eq!(emission.warnings[0].raw, "Q4");
    assert_eq!(emission.resource_streams, vec![Vec::<Value>::new()]);
}

#[test]
fn test_template_fills_later_resources() {
    let dir = setup_project(MUNICIPAL_BUDGET);
    let config = Config::load(dir.path()).unwrap();

    let emission = create_datapackage(&config, &Parameters::default()).unwrap();
    let package = serde_json::to_value(&emission.datapackage).unwrap();
    let resources = package["resources"].as_array().unwrap();

    // copied: absent on the later resources
    assert_eq!(resources[1]["format"], "csv");
    assert_eq!(resources[2]["format"], "csv");
    assert_eq!(resources[1]["schema"], resources[0]["schema"]);
    assert_eq!(resources[2]["encoding"], "utf-8");

    // kept: already present on the later resources
    assert_eq!(resources[1]["encoding"], "latin-1");
    assert_eq!(resources[1]["path"], "data/executed-2019.csv");
    assert_eq!(
        resources[2]["schema"]["fields"],
        json!([{"name": "Note", "type": "string"}])
    );
}

#[test]
fn test_saved_datapackage_layout() {
    let dir = setup_project(MUNICIPAL_BUDGET);
    let config = Config::load(dir.path()).unwrap();

    let params: Parameters = serde_json::from_str(r#"{"save_datapackage": true}"#).unwrap();
    create_datapackage(&config, &params).unwrap();

    let path = dir.path().join("build/datapackage.json");
    let text = std::fs::read_to_string(&path).unwrap();

    assert!(text.contains("São Paulo"), "non-ASCII must not be escaped");
    assert!(text.contains("\n    \"name\": \"municipal-budget-sao-paulo\""));
    // input order, not sorted
    assert!(text.find("\"title\"").unwrap() < text.find("\"description\"").unwrap());

    let reloaded: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reloaded["resources"][1]["publication_date"], "2020-01-31");
}

#[test]
fn test_configured_format_for_printing() {
    let dir = setup_project(MUNICIPAL_BUDGET);
    let config = Config::load(dir.path()).unwrap();
    assert_eq!(
        config.project.json_format,
        JsonFormat {
            indent: 2,
            sort_keys: true
        }
    );

    let emission = create_datapackage(&config, &Parameters::default()).unwrap();
    let text = config
        .project
        .json_format
        .to_string(&emission.datapackage)
        .unwrap();
    assert!(text.starts_with("{\n  \"description\""));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_missing_title() {
    let dir = setup_project(
        r#"
description: untitled
resources:
  - title: A
    schema:
      fields: []
"#,
    );
    let config = Config::load(dir.path()).unwrap();
    let err = create_datapackage(&config, &Parameters::default()).unwrap_err();
    assert_eq!(err.to_string(), "package is missing required property 'title'");
}

#[test]
fn test_no_resources() {
    let dir = setup_project("title: Empty\nresources: []\n");
    let config = Config::load(dir.path()).unwrap();
    let err = create_datapackage(&config, &Parameters::default()).unwrap_err();
    assert!(matches!(err, Error::NoResources));
}

#[test]
fn test_failed_run_does_not_save() {
    let dir = setup_project("title: Broken\nresources:\n  - title: A\n");
    let config = Config::load(dir.path()).unwrap();
    let params = Parameters {
        save_datapackage: true,
    };
    assert!(create_datapackage(&config, &params).is_err());
    assert!(!dir.path().join("build/datapackage.json").exists());
}

#[test]
fn test_missing_source_file() {
    let dir = setup_project("title: x\n");
    std::fs::remove_file(dir.path().join("source/description.yaml")).unwrap();
    let config = Config::load(dir.path()).unwrap();
    let err = create_datapackage(&config, &Parameters::default()).unwrap_err();
    assert!(matches!(err, Error::DescriptionNotFound { .. }));
    assert!(!err.is_input_error());
}
