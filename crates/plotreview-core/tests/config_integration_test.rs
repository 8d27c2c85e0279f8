//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use plotreview_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const ENV_KEYS: [&str; 3] = [
    "PLOTREVIEW_MIN_AREA_SQ_METERS",
    "PLOTREVIEW_MIN_VERTICES",
    "PLOTREVIEW_MAX_REASON_LEN",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
min_area_sq_meters = 4.0
# Only override the area, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.min_area_sq_meters.value, 4.0);
    assert_eq!(config.min_area_sq_meters.source, ConfigSource::File);
    assert_eq!(config.min_vertices.value, 4);
    assert_eq!(config.min_vertices.source, ConfigSource::Default);
    assert_eq!(config.max_reason_len.source, ConfigSource::Default);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("PLOTREVIEW_MIN_AREA_SQ_METERS", "100");
    env::set_var("PLOTREVIEW_MIN_VERTICES", "6");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
min_area_sq_meters = 25.0
min_vertices = 5
max_reason_len = 250
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.min_area_sq_meters.value, 100.0);
    assert_eq!(config.min_area_sq_meters.source, ConfigSource::Environment);
    assert_eq!(config.min_vertices.value, 6);
    assert_eq!(config.min_vertices.source, ConfigSource::Environment);
    // Not set in the environment, so the file value stays
    assert_eq!(config.max_reason_len.value, 250);
    assert_eq!(config.max_reason_len.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_value_is_ignored() {
    clear_env();
    env::set_var("PLOTREVIEW_MIN_VERTICES", "two");
    env::set_var("PLOTREVIEW_MIN_AREA_SQ_METERS", "-5");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.min_vertices.value, 4);
    assert_eq!(config.min_vertices.source, ConfigSource::Default);
    assert_eq!(config.min_area_sq_meters.value, 10.0);
    assert_eq!(config.min_area_sq_meters.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_configuration_precedence_order() {
    clear_env();
    env::set_var("PLOTREVIEW_MAX_REASON_LEN", "300");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_reason_len = 200").unwrap();

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.max_reason_len.value, 300);
    assert_eq!(config.max_reason_len.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        max_reason_len: Some(120),
        ..Default::default()
    });

    assert_eq!(config.max_reason_len.value, 120);
    assert_eq!(config.max_reason_len.source, ConfigSource::Cli);
    assert_eq!(config.rules().max_reason_len, 120);

    assert!(ConfigSource::Cli.precedence() > ConfigSource::Environment.precedence());
    assert!(ConfigSource::Environment.precedence() > ConfigSource::File.precedence());
    assert!(ConfigSource::File.precedence() > ConfigSource::Default.precedence());

    clear_env();
}

#[test]
fn test_configuration_source_tracking() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "min_area_sq_meters = 12.5").unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    let inspection_map = config.to_inspection_map();

    let (area_value, area_source) = &inspection_map["min_area_sq_meters"];
    assert_eq!(area_value, "12.5");
    assert_eq!(*area_source, ConfigSource::File);

    let (len_value, len_source) = &inspection_map["max_reason_len"];
    assert_eq!(len_value, "500");
    assert_eq!(*len_source, ConfigSource::Default);
}

#[test]
fn test_invalid_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid toml content [[[").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());

    assert!(result.is_err());
}

#[test]
fn test_wrong_value_type_in_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "min_vertices = \"many\"").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());

    assert!(result.is_err());
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let non_existent = temp_dir.path().join("does_not_exist.toml");

    let result = LayeredConfig::with_defaults().load_from_file(&non_existent);

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_full_configuration_workflow() {
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("plotreview.toml");
    fs::write(
        &config_path,
        r#"
min_area_sq_meters = 25.0
min_vertices = 5
max_reason_len = 250
"#,
    )
    .unwrap();

    env::set_var("PLOTREVIEW_MIN_VERTICES", "8");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(&config_path)
        .unwrap()
        .load_from_env();

    assert_eq!(config.min_area_sq_meters.value, 25.0);
    assert_eq!(config.min_area_sq_meters.source, ConfigSource::File);
    assert_eq!(config.min_vertices.value, 8);
    assert_eq!(config.min_vertices.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        min_area_sq_meters: Some(1.0),
        ..Default::default()
    });

    let rules = config.rules();
    assert_eq!(rules.min_area_sq_meters, 1.0);
    assert_eq!(rules.min_vertices, 8);
    assert_eq!(rules.max_reason_len, 250);

    clear_env();
}
