//! Pagination state for the table.
//!
//! Pages are 1-based. The current page always stays inside
//! `[1, total_pages]`, and there is always at least one page, even when
//! there are no items.
//!
//! # Example
//!
//! ```rust
//! use tabula::paginator::Paginator;
//!
//! let mut paginator = Paginator::new().per_page(10);
//! paginator.set_total_pages_from_items(25);
//! assert_eq!(paginator.total_pages(), 3);
//!
//! paginator.next_page();
//! assert_eq!(paginator.page(), 2);
//!
//! // Get slice bounds for rendering
//! let items: Vec<u32> = (1..=25).collect();
//! let (start, end) = paginator.get_slice_bounds(items.len());
//! assert_eq!(&items[start..end], &[11, 12, 13, 14, 15, 16, 17, 18, 19, 20]);
//! ```

/// Pagination model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    /// Current page (1-indexed).
    page: usize,
    /// Items per page.
    per_page: usize,
    /// Total number of pages.
    total_pages: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Creates a new paginator on page 1 with one item per page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            per_page: 1,
            total_pages: 1,
        }
    }

    /// Sets the number of items per page.
    #[must_use]
    pub fn per_page(mut self, n: usize) -> Self {
        self.per_page = n.max(1);
        self
    }

    /// Returns the current page (1-indexed).
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Sets the current page, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages);
    }

    /// Returns the items per page.
    #[must_use]
    pub fn get_per_page(&self) -> usize {
        self.per_page
    }

    /// Changes the page size and returns to page 1.
    pub fn set_per_page(&mut self, n: usize) {
        self.per_page = n.max(1);
        self.page = 1;
    }

    /// Returns the total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Calculates the total pages from an item count and clamps the page.
    ///
    /// Returns the calculated total pages.
    pub fn set_total_pages_from_items(&mut self, items: usize) -> usize {
        self.total_pages = items.div_ceil(self.per_page).max(1);
        if self.page > self.total_pages {
            self.page = self.total_pages;
        }
        self.total_pages
    }

    /// Returns slice bounds for the current page.
    ///
    /// Both bounds are clamped to `length`, so the result is always a valid
    /// range even if the item count changed since the last recalculation.
    #[must_use]
    pub fn get_slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Navigates to the previous page.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Navigates to the next page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Returns whether we're on the last page.
    #[must_use]
    pub fn on_last_page(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Renders the page indicator, e.g. `"2/5"`.
    #[must_use]
    pub fn view(&self) -> String {
        format!("{}/{}", self.page, self.total_pages)
    }
}
