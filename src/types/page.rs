use serde::{Deserialize, Serialize};

/// One entry in the compressed page-number strip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable 1-indexed page number.
    Page(usize),
    /// A gap marker between two non-adjacent page numbers.
    Ellipsis,
}

impl PageItem {
    /// Label rendered for this entry.
    pub fn label(&self) -> String {
        match self {
            PageItem::Page(n) => n.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        }
    }
}
