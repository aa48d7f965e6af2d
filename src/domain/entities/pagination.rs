//! Pagination state of listing results.

use serde::{Deserialize, Serialize};

/// Half-width of the page-number window around the current page.
const WINDOW_RADIUS: u32 = 2;

/// Position within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based.
    pub current: u32,
    /// Total number of pages; zero for an empty result.
    pub pages: u32,
    /// Total number of matching items.
    #[serde(default)]
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            pages: 1,
            total: 0,
        }
    }
}

impl Pagination {
    /// Creates pagination for page `current` of `pages`.
    #[must_use]
    pub const fn new(current: u32, pages: u32, total: u64) -> Self {
        Self {
            current,
            pages,
            total,
        }
    }

    /// Returns whether `page` is a selectable page number.
    #[must_use]
    pub const fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.pages
    }

    /// Returns whether a page precedes the current one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Returns whether a page follows the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current < self.pages
    }

    /// Page numbers to show in the pager, see [`visible_pages`].
    #[must_use]
    pub fn visible_pages(&self) -> Vec<u32> {
        visible_pages(self)
    }
}

/// Sliding window of page numbers centred on the current page.
///
/// Spans `current - 2 ..= current + 2`, clipped to `1 ..= pages`.
#[must_use]
pub fn visible_pages(pagination: &Pagination) -> Vec<u32> {
    let start = pagination.current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = pagination
        .current
        .saturating_add(WINDOW_RADIUS)
        .min(pagination.pages);

    (start..=end).collect()
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records of this page.
    pub items: Vec<T>,
    /// Position of this page in the result set.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Bundles a page of records with its pagination.
    #[must_use]
    pub const fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }
}
