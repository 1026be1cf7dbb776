// LinkSaver state managers
// Managers own stateful pieces: the link store, the search session, the paginator, and selection.

pub mod link_manager;
pub mod page_manager;
pub mod search_manager;
pub mod selection;
