//! Integration tests for App: session lifecycle, snapshot-driven state,
//! pagination, search and settings propagation.

use std::time::{Duration, Instant};

use linksaver::app::App;
use linksaver::services::localization_engine::{LocalizationEngineTrait, TextDirection};
use linksaver::services::settings_engine::SettingsEngineTrait;
use linksaver::types::errors::LinkError;
use linksaver::types::link::LinkDraft;
use serde_json::json;
use tempfile::TempDir;

fn make_app(dir: &TempDir) -> App {
    App::new(&dir.path().join("links.db"), Some(dir.path().join("settings.json")))
        .expect("Failed to create app")
}

fn draft(name: &str) -> LinkDraft {
    LinkDraft {
        name: name.to_string(),
        ..Default::default()
    }
}

fn seed(app: &mut App, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| app.create_link(&draft(&format!("Site {}", i))).unwrap())
        .collect()
}

#[test]
fn test_operations_need_a_session() {
    let dir = TempDir::new().unwrap();
    let mut app = make_app(&dir);

    assert_eq!(app.user_id(), None);
    assert!(matches!(app.create_link(&draft("X")), Err(LinkError::NotAuthenticated)));
    assert!(matches!(app.get_link("x"), Err(LinkError::NotAuthenticated)));
    assert!(matches!(app.delete_link("x"), Err(LinkError::NotAuthenticated)));
    assert!(!app.sync());
}

#[test]
fn test_snapshot_follows_writes() {
    let dir = TempDir::new().unwrap();
    let mut app = make_app(&dir);
    app.open_session("u1").unwrap();
    assert_eq!(app.user_id(), Some("u1"));
    assert!(app.snapshot().is_empty());

    let first = app.create_link(&draft("Google")).unwrap();
    let second = app.create_link(&draft("GitHub")).unwrap();
    let names: Vec<&str> = app.snapshot().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["GitHub", "Google"]);

    app.update_link(&first, &draft("Google Mail")).unwrap();
    assert_eq!(app.get_link(&first).unwrap().name, "Google Mail");
    assert!(app.snapshot().iter().any(|l| l.name == "Google Mail"));

    app.delete_link(&second).unwrap();
    assert_eq!(app.snapshot().len(), 1);
}

#[test]
fn test_reopening_a_session_loads_stored_links() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = make_app(&dir);
        app.open_session("u1").unwrap();
        seed(&mut app, 3);
    }

    let mut app = make_app(&dir);
    app.open_session("u1").unwrap();
    assert_eq!(app.snapshot().len(), 3);

    app.open_session("u2").unwrap();
    assert_eq!(app.user_id(), Some("u2"));
    assert!(app.snapshot().is_empty());
}

#[test]
fn test_close_session_clears_derived_state() {
    let dir = TempDir::new().unwrap();
    let mut app = make_app(&dir);
    app.open_session("u1").unwrap();
    let ids = seed(&mut app, 2);
    app.select_card(&ids[0]).unwrap();

    app.close_session();
    assert_eq!(app.user_id(), None);
    assert!(app.snapshot().is_empty());
    assert!(app.selection.current().is_none());
    assert!(app.current_page_links().is_empty());
}

#[test]
fn test_pagination_tracks_collection_size() {
    let dir = TempDir::new().unwrap();
    let mut app = make_app(&dir);
    app.open_session("u1").unwrap();
    let ids = seed(&mut app, 25);

    assert_eq!(app.paginator.total_pages(), 3);
    assert_eq!(app.current_page_links().len(), 12);
    assert_eq!(app.go_to_page(3), 3);
    assert_eq!(app.current_page_links().len(), 1);

    // Oldest link is alone on the last page.
    app.delete_link(&ids[0]).unwrap();
    assert_eq!(app.paginator.current_page(), 2);
    assert_eq!(app.current_page_links().len(), 12);
}

#[test]
fn test_search_then_select() {
    let dir = TempDir::new().unwrap();
    let mut app = make_app(&dir);
    app.open_session("u1").unwrap();
    app.create_link(&draft("Google")).unwrap();
    let gh = app.create_link(&draft("GitHub")).unwrap();

    let t0 = Instant::now();
    app.search_input("hub", t0);
    assert!(app.search.results().is_empty());
    assert!(app.search_tick(t0 + Duration::from_millis(250)));
    assert_eq!(app.search.results().len(), 1);

    let picked = app.select_search_result(&gh).unwrap();
    assert_eq!(picked.name, "GitHub");
    assert_eq!(app.selection.current().map(|l| l.id.as_str()), Some(gh.as_str()));
    assert_eq!(app.search.query(), "");
    assert!(!app.search.is_open());
}

#[test]
fn test_open_detail_follows_edits_and_deletes() {
    let dir = TempDir::new().unwrap();
    let mut app = make_app(&dir);
    app.open_session("u1").unwrap();
    let id = app.create_link(&draft("Google")).unwrap();

    app.select_card(&id).unwrap();
    app.update_link(&id, &draft("Google Drive")).unwrap();
    assert_eq!(app.selection.current().map(|l| l.name.as_str()), Some("Google Drive"));

    app.delete_link(&id).unwrap();
    assert!(app.selection.current().is_none());
    assert!(app.select_card(&id).is_none());
}

#[test]
fn test_settings_reach_live_components() {
    let dir = TempDir::new().unwrap();
    let mut app = make_app(&dir);
    app.open_session("u1").unwrap();
    seed(&mut app, 10);

    app.set_setting("pagination.page_size", json!(4)).unwrap();
    assert_eq!(app.paginator.page_size(), 4);
    assert_eq!(app.paginator.total_pages(), 3);

    app.set_setting("search.debounce_ms", json!(0)).unwrap();
    let now = Instant::now();
    app.search_input("site 9", now);
    assert!(app.search_tick(now));
    assert_eq!(app.search.results().len(), 1);

    app.reset_settings().unwrap();
    assert_eq!(app.paginator.page_size(), 12);
}

#[test]
fn test_language_is_remembered() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = make_app(&dir);
        assert_eq!(app.toggle_language().unwrap(), "ar");
        assert_eq!(app.localization_engine.text_direction(), TextDirection::Rtl);
        assert_eq!(app.settings_engine.get_settings().general.language, "ar");
    }

    let mut app = make_app(&dir);
    assert_eq!(app.localization_engine.get_locale(), "ar");
    app.set_language("en").unwrap();
    assert!(app.set_language("de").is_err());
    assert_eq!(app.localization_engine.get_locale(), "en");
}

#[test]
fn test_settings_change_keeps_search_state() {
    let dir = TempDir::new().unwrap();
    let mut app = make_app(&dir);
    app.open_session("u1").unwrap();
    app.create_link(&draft("GitHub")).unwrap();
    app.create_link(&draft("Google")).unwrap();

    let t0 = Instant::now();
    app.search_input("git", t0);
    app.search_tick(t0 + Duration::from_millis(250));
    assert!(app.search.is_open());
    assert_eq!(app.search.results().len(), 1);

    app.set_setting("appearance.theme", json!("Dark")).unwrap();
    assert_eq!(app.search.query(), "git");
    assert_eq!(app.search.debounced_query(), "git");
    assert!(app.search.is_open());
    assert_eq!(app.search.results().len(), 1);
    assert_eq!(app.search.results()[0].name, "GitHub");

    app.reset_settings().unwrap();
    assert_eq!(app.search.query(), "git");
    assert!(app.search.is_open());
}
