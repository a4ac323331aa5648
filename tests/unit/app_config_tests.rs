/*!
 * Tests for configuration loading, saving and validation
 */

use anyhow::Result;
use subtran::app_config::{Config, LogLevel};

use crate::common;

#[test]
fn test_defaultConfig_shouldHaveFreeTierLimitAndNoKey() {
    let config = Config::default();

    assert_eq!(config.deepl_api_key, "");
    assert!(!config.has_api_key());
    assert_eq!(config.source_language, "");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.character_limit, 500_000);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_loadOrDefault_withMissingFile_shouldFallBackToDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("does-not-exist.json");

    let config = Config::load_or_default(&path)?;

    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_saveAndLoad_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.deepl_api_key = "abc123:fx".to_string();
    config.source_language = "en".to_string();
    config.target_language = "ja".to_string();
    config.character_limit = 123_456;
    config.save(&path)?;

    let loaded = Config::load(&path)?;

    assert_eq!(loaded, config);
    assert!(loaded.has_api_key());
    Ok(())
}

#[test]
fn test_load_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "deepl_api_key": "xyz:fx" }"#,
    )?;

    let config = Config::load(&path)?;

    assert_eq!(config.deepl_api_key, "xyz:fx");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.character_limit, 500_000);
    Ok(())
}

#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        "{ not json",
    )?;

    assert!(Config::load(&path).is_err());
    Ok(())
}

#[test]
fn test_validate_withDefaults_shouldPass() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_withZeroCharacterLimit_shouldFail() {
    let mut config = Config::default();
    config.character_limit = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withBadTargetLanguage_shouldFail() {
    let mut config = Config::default();
    config.target_language = "klingon".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withEmptySourceLanguage_shouldPass() {
    // Empty source means DeepL auto-detects; only a present-but-bad code fails
    let mut config = Config::default();
    config.source_language = String::new();
    assert!(config.validate().is_ok());

    config.source_language = "zz".to_string();
    assert!(config.validate().is_err());
}
