//! RPC method handler for the LinkSaver JSON-RPC protocol.
//!
//! `handle_method` dispatches one call to the `App`; `main.rs` owns the
//! stdin/stdout loop so this stays unit-testable.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use serde_json::{json, Value};

use crate::app::App;
use crate::services::error_messages;
use crate::services::localization_engine::LocalizationEngineTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::link::{Link, LinkDraft, LinkIcon};

/// Compact row used by the search dropdown and the dashboard grid.
pub fn link_summary(link: &Link) -> Value {
    let (icon_kind, icon) = match link.icon() {
        LinkIcon::Glyph(g) => ("glyph", g),
        LinkIcon::Image(data) => ("image", data),
    };
    json!({
        "id": link.id,
        "name": link.name,
        "icon_kind": icon_kind,
        "icon": icon,
        "hostname": link.display_hostname(),
        "account_count": link.account_count(),
    })
}

fn full_link(link: &Link) -> Result<Value, String> {
    let mut value = serde_json::to_value(link).map_err(|e| e.to_string())?;
    value["hostname"] = json!(link.display_hostname());
    Ok(value)
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn draft_param(params: &Value) -> Result<LinkDraft, String> {
    serde_json::from_value(params.clone()).map_err(|e| format!("invalid link: {}", e))
}

fn search_state(a: &App) -> Value {
    let results: Vec<Value> = a.search.results().iter().map(link_summary).collect();
    json!({
        "query": a.search.query(),
        "debounced": a.search.debounced_query(),
        "open": a.search.is_open(),
        "no_results": a.search.shows_no_results(),
        "results": results,
    })
}

fn page_state(a: &App) -> Value {
    let layout = a.paginator.layout();
    let items: Vec<Value> = a.current_page_links().iter().map(link_summary).collect();
    let pages: Vec<String> = layout.page_numbers().iter().map(|p| p.label()).collect();
    json!({
        "items": items,
        "page": layout.safe_page,
        "total_pages": layout.total_pages,
        "total_items": layout.total_items,
        "show_controls": layout.shows_controls(),
        "pages": pages,
    })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;
    a.sync();

    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Session ───
        "session.open" => {
            let user = str_param(params, "user_id")?;
            a.open_session(user).map_err(|e| e.to_string())?;
            Ok(json!({"user_id": user, "total_items": a.snapshot().len()}))
        }
        "session.close" => {
            a.close_session();
            Ok(json!({"ok": true}))
        }

        // ─── Links ───
        "link.add" => {
            let draft = draft_param(params)?;
            let id = a.create_link(&draft).map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "link.update" => {
            let id = str_param(params, "id")?;
            let draft = draft_param(params)?;
            a.update_link(id, &draft).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "link.delete" => {
            let id = str_param(params, "id")?;
            a.delete_link(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "link.get" => {
            let id = str_param(params, "id")?;
            let link = a.get_link(id).map_err(|e| e.to_string())?;
            full_link(&link)
        }
        "link.page" => {
            if let Some(page) = params.get("page") {
                let page = page.as_i64().ok_or("page must be an integer")?;
                a.go_to_page(page);
            }
            Ok(page_state(&a))
        }

        // ─── Search ───
        "search.input" => {
            let query = str_param(params, "query")?;
            a.search_input(query, Instant::now());
            Ok(search_state(&a))
        }
        "search.clear" => {
            a.search.clear_input(Instant::now());
            Ok(search_state(&a))
        }
        "search.focus" => {
            a.search.focus();
            Ok(search_state(&a))
        }
        "search.blur" => {
            a.search.click_outside();
            Ok(search_state(&a))
        }
        "search.tick" => {
            a.search_tick(Instant::now());
            Ok(search_state(&a))
        }
        "search.select" => {
            let id = str_param(params, "id")?;
            let link = a
                .select_search_result(id)
                .ok_or_else(|| format!("not a current result: {}", id))?;
            full_link(&link)
        }

        // ─── Selection ───
        "card.select" => {
            let id = str_param(params, "id")?;
            let link = a.select_card(id).ok_or_else(|| format!("Link not found: {}", id))?;
            full_link(&link)
        }
        "selection.current" => match a.selection.current() {
            Some(link) => full_link(link),
            None => Ok(Value::Null),
        },
        "selection.close" => {
            a.selection.close();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string()),
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            a.set_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            a.reset_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Localization ───
        "i18n.set_locale" => {
            let locale = str_param(params, "locale")?;
            a.set_language(locale).map_err(|e| e.to_string())?;
            Ok(json!({"locale": locale, "dir": a.localization_engine.text_direction().as_str()}))
        }
        "i18n.toggle" => {
            let locale = a.toggle_language().map_err(|e| e.to_string())?;
            Ok(json!({"locale": locale, "dir": a.localization_engine.text_direction().as_str()}))
        }
        "i18n.t" => {
            let key = str_param(params, "key")?;
            let vars: Option<HashMap<String, String>> = params
                .get("params")
                .and_then(|v| v.as_object())
                .map(|obj| {
                    obj.iter()
                        .map(|(k, v)| {
                            let text = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
                            (k.clone(), text)
                        })
                        .collect()
                });
            let text = match params.get("count").and_then(|v| v.as_u64()) {
                Some(count) => a.localization_engine.plural(key, count, vars.as_ref()),
                None => a.localization_engine.t(key, vars.as_ref()),
            };
            Ok(json!({"text": text}))
        }
        "error.message" => {
            let code = str_param(params, "code")?;
            Ok(json!({
                "key": error_messages::friendly_error_key(code),
                "message": error_messages::friendly_error_message(code, &a.localization_engine),
            }))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
