/*!
 * Tests for application configuration
 */

use anyhow::Result;
use log::LevelFilter;
use dgproc::app_config::{Config, LogLevel};
use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.wrap_column, 79);
    assert!(config.check);
    assert_eq!(config.default_filters, vec!["pass"]);
    assert_eq!(config.default_views, vec!["null"]);
}

#[test]
fn test_validate_withTooNarrowWrapColumn_shouldFail() {
    let config = Config {
        wrap_column: 10,
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        wrap_column: 0,
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withNoDefaultViews_shouldFail() {
    let config = Config {
        default_views: Vec::new(),
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("default view"));
}

#[test]
fn test_validate_withBlankFilterName_shouldFail() {
    let config = Config {
        default_filters: vec!["pass".to_string(), " ".to_string()],
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_load_or_default_withMissingFile_shouldReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("absent.json"))?;

    assert_eq!(config, Config::default());
    assert!(!temp_dir.path().join("absent.json").exists());
    Ok(())
}

#[test]
fn test_load_or_default_withPartialFile_shouldFillMissingFields() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "config.json",
        r#"{"log_level": "debug", "default_views": ["text-simple"]}"#,
    )?;

    let config = Config::load_or_default(&path)?;
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.default_views, vec!["text-simple"]);
    assert_eq!(config.default_filters, vec!["pass"]);
    assert!(config.check);
    Ok(())
}

#[test]
fn test_load_or_default_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "config.json", "{ not json")?;

    assert!(Config::load_or_default(&path).is_err());
    Ok(())
}

#[test]
fn test_log_level_to_level_filter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}
