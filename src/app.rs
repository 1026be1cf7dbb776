//! App Core for LinkSaver.
//!
//! Holds the store, settings, translations and one user session's view state.
//! Snapshots from the store arrive on a channel and are applied in order by
//! [`App::sync`], so all derived state changes on the caller's thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::database::connection::Database;
use crate::managers::link_manager::{LinkManager, LinkManagerTrait, SubscriptionId};
use crate::managers::page_manager::Paginator;
use crate::managers::search_manager::SearchSession;
use crate::managers::selection::SelectionDispatcher;
use crate::services::localization_engine::{LocalizationEngine, LocalizationEngineTrait, SUPPORTED_LOCALES};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{LinkError, LocaleError, SettingsError};
use crate::types::link::{Link, LinkDraft};

/// The signed-in user's live subscription.
struct UserSession {
    user_id: String,
    subscription: SubscriptionId,
    inbox: Receiver<Vec<Link>>,
}

/// Central application struct.
pub struct App {
    pub db: Arc<Database>,
    pub links: LinkManager,
    pub settings_engine: SettingsEngine,
    pub localization_engine: LocalizationEngine,
    pub search: SearchSession,
    pub paginator: Paginator,
    pub selection: SelectionDispatcher,
    session: Option<UserSession>,
    snapshot: Vec<Link>,
}

impl App {
    /// Opens the database at `db_path` and builds every component from the stored settings.
    ///
    /// `settings_path` overrides the platform config location. A missing or
    /// unreadable settings file falls back to defaults.
    pub fn new(db_path: &Path, settings_path: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);

        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            warn!("Using default settings: {}", e);
        }
        let settings = settings_engine.get_settings().clone();

        let mut localization_engine = LocalizationEngine::bundled();
        localization_engine.initialize()?;
        let preferred = settings.general.language.as_str();
        let locale = if SUPPORTED_LOCALES.contains(&preferred) {
            preferred.to_string()
        } else {
            localization_engine.detect_system_locale()
        };
        localization_engine.set_locale(&locale)?;

        info!("LinkSaver ready (db: {}, locale: {})", db_path.display(), locale);

        Ok(Self {
            links: LinkManager::new(db.clone()),
            db,
            settings_engine,
            localization_engine,
            search: SearchSession::new(&settings.search),
            paginator: Paginator::new(settings.pagination.page_size),
            selection: SelectionDispatcher::new(),
            session: None,
            snapshot: Vec::new(),
        })
    }

    /// Subscribes to `user_id`'s links, replacing any open session.
    pub fn open_session(&mut self, user_id: &str) -> Result<(), LinkError> {
        self.close_session();

        let (tx, inbox) = mpsc::channel();
        let subscription = self.links.subscribe(
            user_id,
            Box::new(move |links: &[Link]| {
                // The receiver only disappears when the session closes.
                let _ = tx.send(links.to_vec());
            }),
        )?;

        info!("Session opened for {}", user_id);
        self.session = Some(UserSession {
            user_id: user_id.to_string(),
            subscription,
            inbox,
        });
        self.sync();
        Ok(())
    }

    /// Cancels the subscription and any pending search update, and drops derived state.
    pub fn close_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.links.unsubscribe(session.subscription);
        self.search.cancel_pending();
        self.selection.close();
        self.apply_snapshot(Vec::new());
        info!("Session closed for {}", session.user_id);
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    /// Applies the newest delivered snapshot, if any. Returns `true` when one was applied.
    pub fn sync(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let latest = session.inbox.try_iter().last();
        match latest {
            Some(links) => {
                self.apply_snapshot(links);
                true
            }
            None => false,
        }
    }

    fn apply_snapshot(&mut self, links: Vec<Link>) {
        self.search.set_snapshot(&links);
        self.paginator.set_total_items(links.len());
        self.selection.refresh(&links);
        self.snapshot = links;
    }

    /// The full collection as last delivered, newest first.
    pub fn snapshot(&self) -> &[Link] {
        &self.snapshot
    }

    pub fn current_page_links(&self) -> &[Link] {
        self.paginator.page(&self.snapshot)
    }

    pub fn go_to_page(&mut self, page: i64) -> usize {
        self.paginator.go_to_page(page)
    }

    pub fn search_input(&mut self, text: &str, now: Instant) {
        self.search.input(text, now);
    }

    pub fn search_tick(&mut self, now: Instant) -> bool {
        self.search.tick(now)
    }

    pub fn select_search_result(&mut self, id: &str) -> Option<Link> {
        self.search.select(id, &mut self.selection)
    }

    /// Opens the detail view for a dashboard card.
    pub fn select_card(&mut self, id: &str) -> Option<Link> {
        let link = self.snapshot.iter().find(|l| l.id == id)?.clone();
        self.selection.dispatch(&link);
        Some(link)
    }

    fn require_user(&self) -> Result<String, LinkError> {
        self.user_id()
            .map(str::to_string)
            .ok_or(LinkError::NotAuthenticated)
    }

    pub fn create_link(&mut self, draft: &LinkDraft) -> Result<String, LinkError> {
        let user = self.require_user()?;
        let id = self.links.create_link(&user, draft)?;
        self.sync();
        Ok(id)
    }

    pub fn update_link(&mut self, id: &str, draft: &LinkDraft) -> Result<(), LinkError> {
        let user = self.require_user()?;
        self.links.update_link(&user, id, draft)?;
        self.sync();
        Ok(())
    }

    pub fn delete_link(&mut self, id: &str) -> Result<(), LinkError> {
        let user = self.require_user()?;
        self.links.delete_link(&user, id)?;
        self.sync();
        Ok(())
    }

    pub fn get_link(&self, id: &str) -> Result<Link, LinkError> {
        let user = self.require_user()?;
        self.links.get_link(&user, id)
    }

    /// Updates one setting and pushes the new values into live components.
    pub fn set_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        self.settings_engine.set_value(key, value)?;
        self.apply_settings();
        Ok(())
    }

    pub fn reset_settings(&mut self) -> Result<(), SettingsError> {
        self.settings_engine.reset()?;
        self.apply_settings();
        Ok(())
    }

    fn apply_settings(&mut self) {
        let settings = self.settings_engine.get_settings().clone();
        self.search.apply_settings(&settings.search);
        self.paginator.set_page_size(settings.pagination.page_size);
        if self.localization_engine.get_locale() != settings.general.language {
            if let Err(e) = self.localization_engine.set_locale(&settings.general.language) {
                warn!("Keeping locale {}: {}", self.localization_engine.get_locale(), e);
            }
        }
    }

    /// Switches the UI language and remembers it in settings.
    pub fn set_language(&mut self, lang: &str) -> Result<(), LocaleError> {
        self.localization_engine.set_locale(lang)?;
        self.remember_language();
        Ok(())
    }

    /// Flips between English and Arabic and remembers the choice.
    pub fn toggle_language(&mut self) -> Result<String, LocaleError> {
        let lang = self.localization_engine.toggle_locale()?.to_string();
        self.remember_language();
        Ok(lang)
    }

    fn remember_language(&mut self) {
        let lang = self.localization_engine.get_locale().to_string();
        if let Err(e) = self
            .settings_engine
            .set_value("general.language", serde_json::Value::String(lang))
        {
            warn!("Language not persisted: {}", e);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.close_session();
    }
}
