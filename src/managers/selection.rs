//! Selection dispatch.
//!
//! Picking a search result or a dashboard card surfaces the full record to
//! every registered listener and marks it as the open detail record.

use log::debug;

use crate::types::link::Link;

/// Callback invoked with the picked record.
pub type SelectionListener = Box<dyn FnMut(&Link) + Send>;

pub type ListenerId = u64;

/// Fans a selected link out to listeners and tracks the open detail view.
pub struct SelectionDispatcher {
    listeners: Vec<(ListenerId, SelectionListener)>,
    next_listener_id: ListenerId,
    current: Option<Link>,
}

impl SelectionDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_listener_id: 1,
            current: None,
        }
    }

    pub fn on_select(&mut self, listener: SelectionListener) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns `false` if no listener had this id.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }

    pub fn dispatch(&mut self, link: &Link) {
        debug!("Selected link {}", link.id);
        for (_, listener) in self.listeners.iter_mut() {
            listener(link);
        }
        self.current = Some(link.clone());
    }

    /// The record whose detail view is open, if any.
    pub fn current(&self) -> Option<&Link> {
        self.current.as_ref()
    }

    pub fn close(&mut self) -> Option<Link> {
        self.current.take()
    }

    /// Keeps the open record in step with a new snapshot; closes it if the record is gone.
    pub fn refresh(&mut self, snapshot: &[Link]) {
        if let Some(open) = &self.current {
            self.current = snapshot.iter().find(|l| l.id == open.id).cloned();
        }
    }
}

impl Default for SelectionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
