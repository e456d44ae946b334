//! Configuration loading tests
//!
//! File loading and precedence are exercised through the public
//! `ConfigManager` API with real files in temporary directories.

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use dsv7::cli::{Cli, VerbosityLevel};
use dsv7::config::{ConfigManager, OutputFormatConfig};
use dsv7::{Config, ConfigError};

#[test]
fn test_partial_toml_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dsv7.toml");
    fs::write(&path, "[output]\nverbose = true\n").unwrap();

    let config = ConfigManager::load_from_file(&path).unwrap();

    assert!(config.output.verbose);
    assert_eq!(config.output.format, OutputFormatConfig::Human);
    assert!(config.validation.check_filename);
    assert_eq!(config.files.extensions, vec!["dsv7"]);
    assert_eq!(config.verbosity(), VerbosityLevel::Verbose);
}

#[test]
fn test_cli_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dsv7.json");
    fs::write(
        &path,
        r#"{"output": {"format": "summary"}, "files": {"extensions": ["dsv"]}}"#,
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "dsv7-validate",
        "--config",
        path.to_str().unwrap(),
        "--format",
        "json",
        "--extensions",
        "DSV7",
        "liste.DSV7",
    ])
    .unwrap();

    let config = ConfigManager::load_config(&cli).unwrap();
    assert_eq!(config.output.format, OutputFormatConfig::Json);
    assert_eq!(config.files.extensions, vec!["DSV7"]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dsv7.toml");
    fs::write(&path, "[files]\nextensions = []\n").unwrap();

    let file_config = ConfigManager::load_from_file(&path).unwrap();
    let merged = ConfigManager::merge_configs(Config::default(), file_config);
    // Empty lists in a file keep the defaults
    assert!(ConfigManager::validate_config(&merged).is_ok());

    let mut config = Config::default();
    config.files.extensions = vec![".DSV7".to_string()];
    assert!(matches!(
        ConfigManager::validate_config(&config),
        Err(ConfigError::Validation(msg)) if msg.contains(".DSV7")
    ));
}

#[test]
fn test_missing_config_file() {
    let result = ConfigManager::load_from_file(std::path::Path::new("/nonexistent/dsv7.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_config_round_trips_through_toml() {
    let mut config = Config::default();
    config.validation.strict = true;
    config.files.exclude_patterns = vec!["**/archiv/**".to_string()];

    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
