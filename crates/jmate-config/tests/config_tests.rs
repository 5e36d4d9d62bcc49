//! Configuration loading and precedence tests

use jmate_config::{
    ConfigError, ConfigLoader, OutputStream, DEFAULT_NATIVE_LIBRARY, DEFAULT_NATIVE_SYMBOL,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> std::path::PathBuf {
    let config_path = dir.join("jmate.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

fn clear_env() {
    for key in [
        "JMATE_NATIVE_LIBRARY",
        "JMATE_NATIVE_SYMBOL",
        "JMATE_OUTPUT",
        "JMATE_LOG",
    ] {
        env::remove_var(key);
    }
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
#[serial]
fn test_load_when_no_config_exists() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert_eq!(config.native().symbol(), DEFAULT_NATIVE_SYMBOL);
    assert_eq!(config.native().library(), DEFAULT_NATIVE_LIBRARY);
    assert_eq!(config.output_stream(), OutputStream::Stdout);
    assert_eq!(config.log_level(), "warn");
}

#[test]
#[serial]
fn test_load_with_empty_config() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();

    // Empty config is valid (all fields optional)
    assert!(config.is_project());
}

#[test]
#[serial]
fn test_load_from_nested_subdirectory() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[log]\nlevel = \"trace\"\n");

    let nested = temp_dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let config = ConfigLoader::new().load_from_directory(&nested).unwrap();

    assert_eq!(config.log_level(), "trace");
    assert_eq!(config.project_root(), Some(temp_dir.path()));
}

#[test]
#[serial]
fn test_load_from_specific_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(
        temp_dir.path(),
        "[native]\nlibrary = \"/opt/lib/libfmt.so\"\n",
    );

    let config = ConfigLoader::new().load_from_file(&path).unwrap();

    assert_eq!(config.native().library(), Some("/opt/lib/libfmt.so"));
}

#[test]
#[serial]
fn test_missing_specific_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigLoader::new().load_from_file(&temp_dir.path().join("nope.toml"));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

// ============================================================================
// Invalid Config Tests
// ============================================================================

#[rstest]
#[case::broken_toml("[native\nsymbol = \"x")]
#[case::unknown_section("[printer]\nname = \"lp0\"\n")]
#[case::unknown_field("[native]\nentry = \"printf_0\"\n")]
#[case::bad_stream("[output]\nstream = \"lp0\"\n")]
#[case::bad_level("[log]\nlevel = \"chatty\"\n")]
#[case::empty_symbol("[native]\nsymbol = \"\"\n")]
#[serial]
fn test_invalid_config_rejected(#[case] content: &str) {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), content);

    let result = ConfigLoader::new().load_from_directory(temp_dir.path());

    assert!(result.is_err(), "expected rejection of {:?}", content);
}

#[test]
#[serial]
fn test_parse_error_names_the_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[native\n");

    let err = ConfigLoader::new().load_from_file(&path).unwrap_err();

    assert!(err.to_string().contains("jmate.toml"));
}

// ============================================================================
// Environment Override Tests
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_file_values() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[native]
symbol = "snprintf"

[output]
stream = "stdout"

[log]
level = "warn"
"#,
    );

    env::set_var("JMATE_NATIVE_LIBRARY", "/tmp/libfmt.so");
    env::set_var("JMATE_OUTPUT", "stderr");
    env::set_var("JMATE_LOG", "debug");
    let config = ConfigLoader::new().load_from_directory(temp_dir.path());
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.native().library(), Some("/tmp/libfmt.so"));
    assert_eq!(config.native().symbol(), "snprintf");
    assert_eq!(config.output_stream(), OutputStream::Stderr);
    assert_eq!(config.log_level(), "debug");
}

#[test]
#[serial]
fn test_env_override_without_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    env::set_var("JMATE_NATIVE_SYMBOL", "alt_snprintf");
    let config = ConfigLoader::new().load_from_directory(temp_dir.path());
    clear_env();

    assert_eq!(config.unwrap().native().symbol(), "alt_snprintf");
}

#[test]
#[serial]
fn test_env_invalid_log_level() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    env::set_var("JMATE_LOG", "verbose");
    let result = ConfigLoader::new().load_from_directory(temp_dir.path());
    clear_env();

    let err = result.unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"Invalid value for 'JMATE_LOG': expected one of off, error, warn, info, debug, trace, got 'verbose'"
    );
}
