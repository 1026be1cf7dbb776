//! Property-based tests for settings persistence.
//!
//! Any valid settings written through `set_value` survive a save and a fresh load.

use linksaver::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linksaver::types::settings::ThemeMode;
use proptest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn arb_theme() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![Just(ThemeMode::Light), Just(ThemeMode::Dark), Just(ThemeMode::System)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn settings_survive_reload(
        language in prop_oneof![Just("en"), Just("ar")],
        theme in arb_theme(),
        debounce_ms in 0u64..2000,
        max_results in 1usize..50,
        page_size in 1usize..100,
    ) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("settings.json");

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.set_value("general.language", json!(language)).unwrap();
        engine.set_value("appearance.theme", serde_json::to_value(&theme).unwrap()).unwrap();
        engine.set_value("search.debounce_ms", json!(debounce_ms)).unwrap();
        engine.set_value("search.max_results", json!(max_results)).unwrap();
        engine.set_value("pagination.page_size", json!(page_size)).unwrap();

        let mut reloaded = SettingsEngine::new(Some(path));
        let loaded = reloaded.load().unwrap();
        prop_assert_eq!(&loaded, engine.get_settings());
        prop_assert_eq!(loaded.general.language.as_str(), language);
        prop_assert_eq!(loaded.appearance.theme, theme);
        prop_assert_eq!(loaded.search.debounce_ms, debounce_ms);
        prop_assert_eq!(loaded.pagination.page_size, page_size);
    }

    #[test]
    fn rejected_values_leave_file_unchanged(bad in prop_oneof![Just(json!(0)), Just(json!("x")), Just(json!(-1))]) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("settings.json");

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.set_value("pagination.page_size", json!(20)).unwrap();
        prop_assert!(engine.set_value("pagination.page_size", bad).is_err());

        let mut reloaded = SettingsEngine::new(Some(path));
        prop_assert_eq!(reloaded.load().unwrap().pagination.page_size, 20);
    }
}
