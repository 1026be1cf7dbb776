//! Page arithmetic for the dashboard grid.
//!
//! Everything here is pure: given an item count, a page size and a requested
//! page, compute the clamped page, the slice bounds and the compressed
//! page-number strip.

use std::ops::Range;

use crate::types::page::PageItem;

/// Items per dashboard page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Number of pages needed for `total_items`, never less than one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total_items.div_ceil(page_size).max(1)
}

/// Resolved paging state for one collection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub total_items: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// The requested page clamped into `1..=total_pages`.
    pub safe_page: usize,
}

/// Clamps `current_page` against the pages available for `total_items`.
///
/// Out-of-range requests (including zero and negatives) are clamped, not rejected.
pub fn paginate(total_items: usize, page_size: usize, current_page: i64) -> PageLayout {
    let page_size = page_size.max(1);
    let total_pages = total_pages(total_items, page_size);
    PageLayout {
        total_items,
        page_size,
        total_pages,
        safe_page: clamp_page(current_page, total_pages),
    }
}

pub(crate) fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let max = total_pages.max(1) as i64;
    requested.clamp(1, max) as usize
}

impl PageLayout {
    /// Index range of the current page within the full collection.
    pub fn range(&self) -> Range<usize> {
        let start = (self.safe_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        start.min(end)..end
    }

    /// Items of the current page. `items` should be the collection this layout was built for.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// A single page hides the whole pagination control.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        page_numbers(self.safe_page, self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.safe_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.safe_page < self.total_pages
    }
}

/// Compressed page strip: first, last, current and its immediate neighbours,
/// with an ellipsis wherever shown numbers are not consecutive.
///
/// Returns an empty strip when there is at most one page.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let mut shown = vec![1, current, total_pages];
    if current > 2 {
        shown.push(current - 1);
    }
    if current + 1 < total_pages {
        shown.push(current + 1);
    }
    shown.sort_unstable();
    shown.dedup();

    let mut items = Vec::with_capacity(shown.len() * 2);
    let mut previous: Option<usize> = None;
    for page in shown {
        if let Some(prev) = previous {
            if page - prev > 1 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}
