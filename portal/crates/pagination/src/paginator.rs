//! Page windowing over an owned result set.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::PageSize;

/// 1-based, inclusive positions of the visible items within the full set.
///
/// All three fields are zero when the result set is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// Position of the first visible item.
    pub first: usize,
    /// Position of the last visible item.
    pub last: usize,
    /// Size of the full result set.
    pub total: usize,
}

/// Paginated view over an in-memory result set.
///
/// ## Invariants
/// - `current_page` is always within `[1, max(total_pages, 1)]`.
/// - An empty result set has zero pages and stays on page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: PageSize,
    current_page: usize,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(Vec::new(), PageSize::default())
    }
}

impl<T> Paginator<T> {
    /// Start on page 1 of `items`.
    #[must_use]
    pub const fn new(items: Vec<T>, page_size: PageSize) -> Self {
        Self {
            items,
            page_size,
            current_page: 1,
        }
    }

    /// Replace the result set and return to page 1.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    /// Change the number of entries per page.
    ///
    /// Always resets to page 1, even when the current page would still be in
    /// range under the new size.
    pub const fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Move to `page`, clamping into `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        self.current_page = page.clamp(1, last);
    }

    /// Advance one page; no-op on the last page.
    pub fn next(&mut self) {
        self.go_to(self.current_page.saturating_add(1));
    }

    /// Go back one page; no-op on page 1.
    pub fn previous(&mut self) {
        self.go_to(self.current_page.saturating_sub(1));
    }

    /// Jump to page 1.
    pub const fn first(&mut self) {
        self.current_page = 1;
    }

    /// Jump to the last page (page 1 when empty).
    pub fn last(&mut self) {
        self.go_to(self.total_pages());
    }

    /// Full result set.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Entries per page.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(len / page_size)`; zero for an empty set.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size.get())
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Page numbers for the pager, `1..=total_pages`; empty when there are no
    /// items.
    #[must_use]
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages()
    }

    /// Items on the current page.
    #[must_use]
    pub fn visible_page(&self) -> &[T] {
        let (start, end) = self.bounds();
        self.items.get(start..end).unwrap_or(&[])
    }

    /// Positions of the visible items for "Showing X to Y of Z" summaries.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        let total = self.items.len();
        let (start, end) = self.bounds();
        if start == end {
            return PageWindow {
                first: 0,
                last: 0,
                total,
            };
        }
        PageWindow {
            first: start.saturating_add(1),
            last: end,
            total,
        }
    }

    fn bounds(&self) -> (usize, usize) {
        let len = self.items.len();
        let size = self.page_size.get();
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(size)
            .min(len);
        let end = start.saturating_add(size).min(len);
        (start, end)
    }
}

impl<T> FromIterator<T> for Paginator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect(), PageSize::default())
    }
}
