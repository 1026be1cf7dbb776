//! Substring search over an in-memory link snapshot.
//!
//! A link matches when the lowercased query occurs in its name or in the email
//! of any of its accounts. Blank queries match nothing.

use crate::types::link::Link;

/// Default cap on the number of results returned by [`search`].
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// Returns `true` if `query` matches `link`.
pub fn matches(link: &Link, query: &str) -> bool {
    if query.trim().is_empty() {
        return false;
    }
    let needle = query.to_lowercase();
    matches_lowered(link, &needle)
}

fn matches_lowered(link: &Link, needle: &str) -> bool {
    link.name.to_lowercase().contains(needle)
        || link.accounts.iter().any(|account| {
            account
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(needle))
        })
}

/// Returns up to `limit` matching links in their original order.
pub fn search(links: &[Link], query: &str, limit: usize) -> Vec<Link> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    links
        .iter()
        .filter(|link| matches_lowered(link, &needle))
        .take(limit)
        .cloned()
        .collect()
}
