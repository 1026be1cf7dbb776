//! Unit tests for SettingsEngine persistence and dot-notation updates.

use std::fs;

use linksaver::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linksaver::types::errors::SettingsError;
use linksaver::types::settings::{AppSettings, ThemeMode};
use serde_json::json;
use tempfile::TempDir;

fn engine_in(dir: &TempDir) -> SettingsEngine {
    SettingsEngine::new(Some(dir.path().join("nested").join("settings.json")))
}

#[test]
fn test_load_without_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings, AppSettings::default());
    assert!(!engine.get_config_path().exists());
}

#[test]
fn test_set_value_persists_and_reloads() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    engine.set_value("search.debounce_ms", json!(100)).unwrap();
    engine.set_value("general.language", json!("ar")).unwrap();
    engine.set_value("appearance.theme", json!("Dark")).unwrap();
    assert!(engine.get_config_path().exists());

    let mut reloaded = engine_in(&dir);
    let settings = reloaded.load().unwrap();
    assert_eq!(settings.search.debounce_ms, 100);
    assert_eq!(settings.general.language, "ar");
    assert_eq!(settings.appearance.theme, ThemeMode::Dark);
    assert_eq!(settings.pagination.page_size, 12);
}

#[test]
fn test_unknown_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    for key in ["", "search.nope", "nope.page_size", "search.debounce_ms.deeper"] {
        let err = engine.set_value(key, json!(1)).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidKey(_)), "key {:?} gave {:?}", key, err);
    }
    assert_eq!(engine.get_settings(), &AppSettings::default());
}

#[test]
fn test_wrong_type_leaves_settings_untouched() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let err = engine.set_value("search.debounce_ms", json!("fast")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().search.debounce_ms, 250);
}

#[test]
fn test_zero_sizes_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    assert!(matches!(
        engine.set_value("pagination.page_size", json!(0)),
        Err(SettingsError::InvalidValue(_))
    ));
    assert!(matches!(
        engine.set_value("search.max_results", json!(0)),
        Err(SettingsError::InvalidValue(_))
    ));
    assert_eq!(engine.get_settings(), &AppSettings::default());
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let mut engine = SettingsEngine::new(Some(path));
    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
    assert_eq!(engine.get_settings(), &AppSettings::default());
}

#[test]
fn test_stored_zero_page_size_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let mut stored = serde_json::to_value(AppSettings::default()).unwrap();
    stored["pagination"]["page_size"] = json!(0);
    fs::write(&path, stored.to_string()).unwrap();

    let mut engine = SettingsEngine::new(Some(path));
    assert!(matches!(engine.load(), Err(SettingsError::InvalidValue(_))));
}

#[test]
fn test_reset_restores_defaults_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    engine.set_value("pagination.page_size", json!(30)).unwrap();
    engine.reset().unwrap();

    let mut reloaded = engine_in(&dir);
    assert_eq!(reloaded.load().unwrap(), AppSettings::default());
}

#[test]
fn test_unsupported_language_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    engine.set_value("general.language", json!("ar")).unwrap();

    let err = engine.set_value("general.language", json!("de")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().general.language, "ar");

    let mut reloaded = engine_in(&dir);
    assert_eq!(reloaded.load().unwrap().general.language, "ar");
}
