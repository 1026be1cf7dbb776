//! Search session state for the dashboard search box.
//!
//! Holds the raw query (updated per keystroke), its debounced counterpart
//! (the value actually used to filter), the dropdown's open flag and the
//! results derived from the latest link snapshot. Time is passed in
//! explicitly so the session can be driven by any event loop.

use std::time::{Duration, Instant};

use crate::managers::selection::SelectionDispatcher;
use crate::services::debounce::Debouncer;
use crate::services::link_search;
use crate::types::link::Link;
use crate::types::settings::SearchSettings;

pub struct SearchSession {
    query: String,
    debounced: Debouncer<String>,
    open: bool,
    max_results: usize,
    snapshot: Vec<Link>,
    results: Vec<Link>,
}

impl SearchSession {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            query: String::new(),
            debounced: Debouncer::new(String::new(), Duration::from_millis(settings.debounce_ms)),
            open: false,
            max_results: settings.max_results,
            snapshot: Vec::new(),
            results: Vec::new(),
        }
    }

    /// A keystroke: updates the raw query, opens the dropdown and restarts the debounce window.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.query = text.to_string();
        self.open = true;
        self.debounced.push(self.query.clone(), now);
    }

    pub fn focus(&mut self) {
        self.open = true;
    }

    /// A click outside the search area closes the dropdown but keeps the query.
    pub fn click_outside(&mut self) {
        self.open = false;
    }

    /// The clear button: empties the raw query; the filter catches up after the debounce window.
    pub fn clear_input(&mut self, now: Instant) {
        self.query.clear();
        self.debounced.push(String::new(), now);
    }

    /// Settles a due debounced query. Returns `true` when the results changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debounced.poll(now).is_some() {
            self.recompute();
            true
        } else {
            false
        }
    }

    /// When the pending query will settle, for scheduling the next `tick`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounced.deadline()
    }

    /// Replaces the collection searched over and recomputes results.
    pub fn set_snapshot(&mut self, links: &[Link]) {
        self.snapshot = links.to_vec();
        self.recompute();
    }

    /// Takes new tuning without touching the query, the open flag or a pending update.
    pub fn apply_settings(&mut self, settings: &SearchSettings) {
        self.debounced.set_delay(Duration::from_millis(settings.debounce_ms));
        self.max_results = settings.max_results;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.results = link_search::search(&self.snapshot, self.debounced.value(), self.max_results);
    }

    /// Picks the result with `id`: dispatches it, then clears both queries and closes the dropdown.
    ///
    /// Returns `None` (and changes nothing) when `id` is not among the current results.
    pub fn select(&mut self, id: &str, dispatcher: &mut SelectionDispatcher) -> Option<Link> {
        let picked = self.results.iter().find(|l| l.id == id)?.clone();
        dispatcher.dispatch(&picked);
        self.query.clear();
        self.debounced.reset(String::new());
        self.open = false;
        self.results.clear();
        Some(picked)
    }

    /// Dropdown visibility: focused and a non-blank debounced query.
    pub fn is_open(&self) -> bool {
        self.open && !self.debounced.value().trim().is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn debounced_query(&self) -> &str {
        self.debounced.value()
    }

    pub fn results(&self) -> &[Link] {
        &self.results
    }

    /// Open with nothing to show: the dropdown renders its "no results" state.
    pub fn shows_no_results(&self) -> bool {
        self.is_open() && self.results.is_empty()
    }

    /// Teardown: drops any pending debounced update.
    pub fn cancel_pending(&mut self) {
        self.debounced.cancel();
    }
}
