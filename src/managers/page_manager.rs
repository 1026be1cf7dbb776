//! Paginator state for the dashboard grid.
//!
//! The current page only changes through [`Paginator::go_to_page`], which
//! clamps and then fires the scroll-to-top listeners. Collection size changes
//! re-clamp silently.

use log::debug;

use crate::services::pagination::{self, PageLayout};
use crate::types::page::PageItem;

/// Called with the committed page after every `go_to_page`.
pub type PageChangeListener = Box<dyn FnMut(usize) + Send>;

pub struct Paginator {
    page_size: usize,
    current_page: usize,
    total_items: usize,
    listeners: Vec<PageChangeListener>,
}

impl Paginator {
    /// Starts on page 1 of an empty collection.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_items: 0,
            listeners: Vec::new(),
        }
    }

    pub fn on_page_change(&mut self, listener: PageChangeListener) {
        self.listeners.push(listener);
    }

    /// Clamps `page` into range, commits it and notifies listeners.
    pub fn go_to_page(&mut self, page: i64) -> usize {
        let layout = pagination::paginate(self.total_items, self.page_size, page);
        self.current_page = layout.safe_page;
        debug!("Page changed to {}/{}", self.current_page, layout.total_pages);
        for listener in self.listeners.iter_mut() {
            listener(self.current_page);
        }
        self.current_page
    }

    pub fn next(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 - 1)
    }

    /// Records a new collection size, pulling the current page back into range if needed.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.layout().safe_page;
    }

    /// Changes items per page, keeping the current page number if it is still valid.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = self.layout().safe_page;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn layout(&self) -> PageLayout {
        pagination::paginate(self.total_items, self.page_size, self.current_page as i64)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.layout().total_pages
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        self.layout().page_numbers()
    }

    /// The current page's slice of `items`.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        pagination::paginate(items.len(), self.page_size, self.current_page as i64).slice(items)
    }
}
