// LinkSaver services
// Services hold the core logic: debouncing, link search, pagination, settings, localization, error messages.

pub mod debounce;
pub mod error_messages;
pub mod link_search;
pub mod localization_engine;
pub mod pagination;
pub mod settings_engine;
