//! Per-session UI state: the active filter and the pagination cursor.
//!
//! A [`Session`] is an explicit value passed into each interaction handler —
//! never ambient globals — so the state machine tests in isolation from any
//! rendering framework. Sessions are reinitialized per process; nothing here
//! persists.

use std::collections::BTreeSet;

use crate::library::{FilterState, StatusFilter};

/// Articles shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 8;

// ============================================================================
// Pager
// ============================================================================

/// Pagination cursor over a dynamic result set.
///
/// Invariant: after any operation that observes a result count,
/// `page < total_pages(count)`, or `page == 0` when the count is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    /// A page size of 0 is clamped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Zero-based current page index.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `count` results. 0 when the result set is empty —
    /// the presentation layer shows an empty message instead of "page 1/1".
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size)
    }

    /// Advance one page; no-op on the last page (or an empty result set).
    pub fn next(&mut self, count: usize) {
        if self.page + 1 < self.total_pages(count) {
            self.page += 1;
        }
    }

    /// Step back one page; no-op on the first.
    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Re-establish the invariant after the result set shrank.
    pub fn clamp(&mut self, count: usize) {
        let last = self.total_pages(count).saturating_sub(1);
        if self.page > last {
            self.page = last;
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// The sub-slice of `results` for the current page, clamping first so a
    /// shrunken result set can never index out of bounds.
    pub fn page_slice<'a, T>(&mut self, results: &'a [T]) -> &'a [T] {
        self.clamp(results.len());
        if results.is_empty() {
            return &[];
        }
        let start = self.page * self.page_size;
        let end = (start + self.page_size).min(results.len());
        &results[start..end]
    }
}

// ============================================================================
// Session
// ============================================================================

/// Filter + pagination state for one dashboard session.
///
/// Every filter mutation that actually changes the value resets pagination
/// to the first page. No-op mutations (setting the same search term again)
/// keep the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    filter: FilterState,
    pager: Pager,
}

impl Session {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterState::default(),
            pager: Pager::new(page_size),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    // ========================================================================
    // Filter Mutations
    // ========================================================================

    pub fn set_search(&mut self, term: &str) {
        if self.filter.search != term {
            self.filter.search = term.to_string();
            self.pager.reset();
        }
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        if self.filter.status != status {
            self.filter.status = status;
            self.pager.reset();
        }
    }

    /// Flip one category checkbox. Always a value change, always resets.
    pub fn toggle_category(&mut self, label: &str) {
        if !self.filter.categories.remove(label) {
            self.filter.categories.insert(label.to_string());
        }
        self.pager.reset();
    }

    /// Replace the whole selected set (group "select all" / "clear all").
    pub fn set_categories(&mut self, categories: BTreeSet<String>) {
        if self.filter.categories != categories {
            self.filter.categories = categories;
            self.pager.reset();
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn next_page(&mut self, count: usize) {
        self.pager.next(count);
    }

    pub fn previous_page(&mut self) {
        self.pager.previous();
    }

    /// The current page of an already-filtered result set.
    pub fn current_page<'a, T>(&mut self, results: &'a [T]) -> &'a [T] {
        self.pager.page_slice(results)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pager_initial_state() {
        let pager = Pager::new(8);
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.page_size(), 8);
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let pager = Pager::new(0);
        assert_eq!(pager.page_size(), 1);
    }

    #[test]
    fn test_total_pages() {
        let pager = Pager::new(8);
        assert_eq!(pager.total_pages(0), 0);
        assert_eq!(pager.total_pages(1), 1);
        assert_eq!(pager.total_pages(8), 1);
        assert_eq!(pager.total_pages(13), 2);
        assert_eq!(pager.total_pages(16), 2);
        assert_eq!(pager.total_pages(17), 3);
    }

    #[test]
    fn test_next_stops_at_last_page() {
        let mut pager = Pager::new(8);
        pager.next(13);
        assert_eq!(pager.page(), 1);
        pager.next(13); // already on the last page
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_next_noop_when_empty() {
        let mut pager = Pager::new(8);
        pager.next(0);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_previous_stops_at_zero() {
        let mut pager = Pager::new(8);
        pager.next(20);
        pager.previous();
        assert_eq!(pager.page(), 0);
        pager.previous();
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_clamp_on_shrink() {
        let mut pager = Pager::new(8);
        pager.next(24);
        pager.next(24);
        assert_eq!(pager.page(), 2);

        pager.clamp(13); // now only 2 pages
        assert_eq!(pager.page(), 1);

        pager.clamp(0);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_page_slice_windows() {
        let results: Vec<usize> = (0..13).collect();
        let mut pager = Pager::new(8);

        assert_eq!(pager.page_slice(&results), (0..8).collect::<Vec<_>>());
        pager.next(results.len());
        assert_eq!(pager.page_slice(&results), (8..13).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_slice_empty() {
        let results: Vec<usize> = Vec::new();
        let mut pager = Pager::new(8);
        assert!(pager.page_slice(&results).is_empty());
    }

    #[test]
    fn test_page_slice_clamps_stale_index() {
        let mut pager = Pager::new(2);
        let many: Vec<usize> = (0..10).collect();
        pager.next(many.len());
        pager.next(many.len());
        assert_eq!(pager.page(), 2);

        // Result set shrank under the cursor
        let few: Vec<usize> = (0..3).collect();
        assert_eq!(pager.page_slice(&few), vec![2]);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_session_search_change_resets_page() {
        let mut session = Session::new(2);
        session.next_page(10);
        assert_eq!(session.pager().page(), 1);

        session.set_search("llm");
        assert_eq!(session.pager().page(), 0);
    }

    #[test]
    fn test_session_same_search_keeps_page() {
        let mut session = Session::new(2);
        session.set_search("llm");
        session.next_page(10);
        assert_eq!(session.pager().page(), 1);

        session.set_search("llm");
        assert_eq!(session.pager().page(), 1);
    }

    #[test]
    fn test_session_status_change_resets_page() {
        let mut session = Session::new(2);
        session.next_page(10);

        session.set_status(StatusFilter::UnreadOnly);
        assert_eq!(session.pager().page(), 0);

        session.next_page(10);
        session.set_status(StatusFilter::UnreadOnly); // unchanged
        assert_eq!(session.pager().page(), 1);
    }

    #[test]
    fn test_session_toggle_category_resets_and_flips() {
        let mut session = Session::new(2);
        session.next_page(10);

        session.toggle_category("Computer Vision (CV)");
        assert!(session.filter().categories.contains("Computer Vision (CV)"));
        assert_eq!(session.pager().page(), 0);

        session.next_page(10);
        session.toggle_category("Computer Vision (CV)");
        assert!(session.filter().categories.is_empty());
        assert_eq!(session.pager().page(), 0);
    }

    #[test]
    fn test_session_set_categories_detects_equality() {
        let mut session = Session::new(2);
        let mut set = BTreeSet::new();
        set.insert("A".to_string());

        session.set_categories(set.clone());
        session.next_page(10);
        session.set_categories(set); // same value: page stays
        assert_eq!(session.pager().page(), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Next,
            Previous,
            Clamp(usize),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Next),
                Just(Op::Previous),
                (0usize..100).prop_map(Op::Clamp),
            ]
        }

        proptest! {
            #[test]
            fn pager_invariant_holds(
                page_size in 1usize..10,
                mut count in 0usize..100,
                ops in proptest::collection::vec(op_strategy(), 0..40),
            ) {
                let mut pager = Pager::new(page_size);
                for op in ops {
                    match op {
                        Op::Next => pager.next(count),
                        Op::Previous => pager.previous(),
                        Op::Clamp(new_count) => {
                            count = new_count;
                            pager.clamp(count);
                        }
                    }
                    let total = pager.total_pages(count);
                    prop_assert!(pager.page() < total || pager.page() == 0);
                }
            }
        }
    }
}
