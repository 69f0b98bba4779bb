//! Page arithmetic over the *visible* (already filtered) sequence.

use std::ops::Range;

/// Page size plus the page the user asked for.
///
/// The requested page is kept as-is; [`Pagination::current`] clamps it into
/// range for a given visible length, so narrowing a filter never leaves the
/// view on an empty page past the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    requested: usize,
}

impl Pagination {
    /// A zero page size is treated as one item per page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            requested: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `len` visible items. Always at least one.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Zero-based page actually shown for `len` visible items.
    pub fn current(&self, len: usize) -> usize {
        self.requested.min(self.page_count(len) - 1)
    }

    /// Request a page; out-of-range requests are clamped for `len`.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.requested = page;
        self.clamp(len);
    }

    pub fn next(&mut self, len: usize) {
        let page = self.current(len) + 1;
        self.go_to(page, len);
    }

    pub fn prev(&mut self, len: usize) {
        let page = self.current(len).saturating_sub(1);
        self.go_to(page, len);
    }

    /// Pin the stored page into range after the visible length changed.
    pub fn clamp(&mut self, len: usize) {
        self.requested = self.current(len);
    }

    /// Index range of the current page within the visible sequence.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = (self.current(len) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    pub fn has_prev(&self, len: usize) -> bool {
        self.current(len) > 0
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current(len) + 1 < self.page_count(len)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let p = Pagination::new(10);
        assert_eq!(p.page_count(0), 1);
        assert_eq!(p.page_count(10), 1);
        assert_eq!(p.page_count(11), 2);
    }

    #[test]
    fn test_clamp_after_narrowing() {
        let mut p = Pagination::new(5);
        p.go_to(3, 20);
        assert_eq!(p.current(20), 3);
        assert_eq!(p.range(20), 15..20);

        // Filter narrows to 7 items: only pages 0 and 1 exist
        assert_eq!(p.current(7), 1);
        assert_eq!(p.range(7), 5..7);
        p.clamp(7);
        // Widening again does not jump back to the stale page
        assert_eq!(p.current(20), 1);
    }

    #[test]
    fn test_empty_visible() {
        let mut p = Pagination::new(5);
        p.go_to(2, 12);
        assert_eq!(p.current(0), 0);
        assert_eq!(p.range(0), 0..0);
    }

    #[test]
    fn test_next_prev_bounds() {
        let mut p = Pagination::new(4);
        p.prev(9);
        assert_eq!(p.current(9), 0);
        p.next(9);
        p.next(9);
        p.next(9);
        assert_eq!(p.current(9), 2);
        assert!(!p.has_next(9));
        assert!(p.has_prev(9));
    }

    #[test]
    fn test_zero_page_size() {
        let p = Pagination::new(0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.page_count(3), 3);
    }
}
