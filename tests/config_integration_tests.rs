//! Integration tests for config loading from fixture files.

use std::fs;
use std::path::Path;

/// Read the sample config file content.
fn read_sample_config() -> String {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    fs::read_to_string(config_path).expect("Failed to read sample config file")
}

#[test]
fn sample_config_file_exists() {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    assert!(config_path.exists(), "Sample config file should exist");
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn tvrename_section_has_expected_structure() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let tvrename = value.get("tvrename").expect("should have tvrename section");

    for key in [
        "debug",
        "dryrun",
        "ignore_filename",
        "verbose",
        "extensions",
        "subtitle_language",
    ] {
        assert!(tvrename.get(key).is_some(), "tvrename section should have '{key}'");
    }
}

#[test]
fn tvrename_extensions_are_strings() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let extensions = value
        .get("tvrename")
        .and_then(|section| section.get("extensions"))
        .and_then(toml::Value::as_array)
        .expect("extensions should be an array");

    assert!(!extensions.is_empty());
    assert!(extensions.iter().all(toml::Value::is_str));
}
