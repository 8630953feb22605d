//! Configuration loading and precedence tests

use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use stepwise_config::{ConfigError, ConfigLoader, ProjectConfig, RunConfig, PROJECT_CONFIG_FILE};
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join(PROJECT_CONFIG_FILE);
    fs::write(&config_path, content).unwrap();
    config_path
}

fn create_global_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("global.toml");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
#[serial]
fn test_load_when_no_config_exists() {
    let temp_dir = TempDir::new().unwrap();

    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert!(!config.is_project());
    assert!(!config.trace());
    assert!(!config.stats());
}

#[test]
#[serial]
fn test_load_with_empty_config() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert!(config.is_project());
    assert_eq!(config.project, ProjectConfig::default());
}

#[test]
#[serial]
fn test_load_from_deep_subdirectory() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[run]\nstats = true\n");

    let deep = temp_dir.path().join("a").join("b").join("c");
    fs::create_dir_all(&deep).unwrap();

    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    let config = loader.load_from_directory(&deep).unwrap();

    assert!(config.stats());
    assert_eq!(config.project_root(), Some(temp_dir.path()));
}

#[test]
#[serial]
fn test_load_from_specific_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[run]\ntrace = true\n");

    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    let config = loader.load_from_file(&path).unwrap();

    assert!(config.trace());
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
#[serial]
fn test_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[run\ntrace = true\n");

    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    match loader.load_from_directory(temp_dir.path()) {
        Err(ConfigError::TomlParse { file, .. }) => assert_eq!(file, path),
        other => panic!("expected TomlParse, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_unknown_section_rejected() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[compiler]\noptimize = true\n");

    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    let err = loader.load_from_directory(temp_dir.path()).unwrap_err();
    assert!(err.to_string().contains("unknown field"));
}

#[test]
#[serial]
fn test_missing_specific_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.toml");

    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    assert!(matches!(
        loader.load_from_file(&path),
        Err(ConfigError::NotFound(_))
    ));
}

// ============================================================================
// Precedence Tests
// ============================================================================

#[test]
#[serial]
fn test_project_overrides_global() {
    let temp_dir = TempDir::new().unwrap();
    let global = create_global_file(
        temp_dir.path(),
        "[run]\ntrace = true\nstats = true\n\n[log]\nfilter = \"info\"\n",
    );
    create_config_file(temp_dir.path(), "[run]\nstats = false\n");

    let mut loader = ConfigLoader::with_global_path(global);
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert_eq!(
        config.run(),
        RunConfig {
            trace: Some(true),
            stats: Some(false),
        }
    );
    assert_eq!(config.log_filter(), Some("info"));
}

#[rstest]
#[case("true", true)]
#[case("YES", true)]
#[case("on", true)]
#[case("0", false)]
#[case("off", false)]
#[serial]
fn test_env_overrides_project(#[case] value: &str, #[case] expected: bool) {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        &format!("[run]\nstats = {}\n", !expected),
    );

    env::set_var("STEPWISE_STATS", value);
    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    let result = loader.load_from_directory(temp_dir.path());
    env::remove_var("STEPWISE_STATS");

    assert_eq!(result.unwrap().stats(), expected);
}

#[test]
#[serial]
fn test_env_applies_without_project() {
    let temp_dir = TempDir::new().unwrap();

    env::set_var("STEPWISE_TRACE", "true");
    let mut loader = ConfigLoader::with_global_path(temp_dir.path().join("missing.toml"));
    let result = loader.load_from_directory(temp_dir.path());
    env::remove_var("STEPWISE_TRACE");

    let config = result.unwrap();
    assert!(!config.is_project());
    assert!(config.trace());
}
