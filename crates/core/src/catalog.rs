//! Display window for the infinite-scroll product grid.
//!
//! The grid fetches the full product set once and reveals a prefix of it,
//! growing the prefix each time the scroll sentinel becomes visible. The
//! window never shrinks and never exceeds the fetched length.
//!
//! The growth arithmetic is asymmetric: the initial window is `page_size`
//! items, but each advance extends the window to
//! `(page - 1) * page_size + page_size + 1` items, one more than a whole
//! page. Downstream tests pin this sequence.

use serde::{Deserialize, Serialize};

/// Number of products revealed by the initial page.
pub const ITEMS_PER_PAGE: usize = 3;

/// A monotonically growing prefix window over the fetched product set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWindow {
    /// Number of items fetched from the backend.
    fetched: usize,
    /// Page counter, starting at 1.
    page: usize,
    /// Items per page.
    page_size: usize,
    /// Current window length.
    visible: usize,
}

impl DisplayWindow {
    /// Create a window over a fetched set, revealing the first page.
    #[must_use]
    pub fn new(fetched: usize) -> Self {
        Self::with_page_size(fetched, ITEMS_PER_PAGE)
    }

    /// Create a window with an explicit page size.
    #[must_use]
    pub fn with_page_size(fetched: usize, page_size: usize) -> Self {
        Self {
            fetched,
            page: 1,
            page_size,
            visible: page_size.min(fetched),
        }
    }

    /// Number of currently revealed items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.visible
    }

    /// Whether nothing is revealed (empty fetched set with page size zero).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.visible == 0
    }

    /// Current page counter.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Whether more items remain beyond the window. The grid shows its
    /// loading sentinel exactly while this holds.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.visible < self.fetched
    }

    /// Advance the window in response to a sentinel visibility crossing.
    ///
    /// Grows the window by `page_size + 1` relative to the previous page
    /// boundary and increments the page counter. Capped at the fetched
    /// length; never shrinks.
    pub fn advance(&mut self) {
        let start = (self.page - 1) * self.page_size;
        let end = start + self.page_size + 1;
        self.visible = end.min(self.fetched).max(self.visible);
        self.page += 1;
    }

    /// The revealed prefix of `items`.
    ///
    /// `items` must be the same fetched sequence the window was built over.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(..self.visible.min(items.len())).unwrap_or(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_window_is_one_page() {
        let window = DisplayWindow::new(8);
        assert_eq!(window.len(), 3);
        assert_eq!(window.page(), 1);
        assert!(window.has_more());
    }

    #[test]
    fn test_initial_window_caps_at_fetched() {
        let window = DisplayWindow::new(2);
        assert_eq!(window.len(), 2);
        assert!(!window.has_more());
    }

    #[test]
    fn test_single_advance_reveals_page_size_plus_one() {
        // Regression pin: 5 fetched items, page size 3, one sentinel
        // trigger -> exactly 4 visible.
        let mut window = DisplayWindow::new(5);
        window.advance();
        assert_eq!(window.len(), 4);
        assert_eq!(window.page(), 2);
        assert!(window.has_more());
    }

    #[test]
    fn test_growth_sequence_over_eight_items() {
        let mut window = DisplayWindow::new(8);
        assert_eq!(window.len(), 3);
        window.advance();
        assert_eq!(window.len(), 4); // 0*3 + 3 + 1
        window.advance();
        assert_eq!(window.len(), 7); // 1*3 + 3 + 1
        window.advance();
        assert_eq!(window.len(), 8); // capped
        assert!(!window.has_more());
    }

    #[test]
    fn test_window_never_shrinks() {
        let mut window = DisplayWindow::new(8);
        window.advance();
        window.advance();
        let len = window.len();
        window.advance();
        window.advance();
        assert!(window.len() >= len);
        assert_eq!(window.len(), 8);
    }

    #[test]
    fn test_slice_returns_prefix() {
        let items: Vec<u32> = (0..8).collect();
        let mut window = DisplayWindow::new(items.len());
        assert_eq!(window.slice(&items), &[0, 1, 2]);
        window.advance();
        assert_eq!(window.slice(&items), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_fetched_set() {
        let mut window = DisplayWindow::new(0);
        assert!(window.is_empty());
        assert!(!window.has_more());
        window.advance();
        assert_eq!(window.len(), 0);
    }
}
