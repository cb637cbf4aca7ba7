//! Pure filter/search pipeline over the loaded library.
//!
//! Three narrowing predicates compose by conjunction — category membership,
//! read-status, case-insensitive substring search — so the result is always
//! a subset of the input and applying the same state twice is a no-op.
//! Ordering is fully deterministic: date descending, unknown dates last,
//! title as the tiebreak, so repeated passes paginate identically.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::types::Item;

// ============================================================================
// Filter State
// ============================================================================

/// The three-way read-status selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    UnreadOnly,
    ReadOnly,
}

/// Everything the user can narrow the listing by.
///
/// Equality-comparable so the session can detect an actual change and reset
/// pagination only then.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Selected category labels. Empty means no narrowing.
    pub categories: BTreeSet<String>,
    pub status: StatusFilter,
    /// Free-text search term. Blank means no narrowing.
    pub search: String,
}

impl FilterState {
    /// Whether an item survives all three predicates.
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_category(item) && self.matches_status(item) && self.matches_search(item)
    }

    fn matches_category(&self, item: &Item) -> bool {
        self.categories.is_empty() || self.categories.contains(&item.category)
    }

    fn matches_status(&self, item: &Item) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::UnreadOnly => !item.read,
            StatusFilter::ReadOnly => item.read,
        }
    }

    fn matches_search(&self, item: &Item) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        if item.title.to_lowercase().contains(&term) {
            return true;
        }
        // A missing subtitle is an empty string: never matches a real term.
        item.subtitle
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(&term))
    }
}

// ============================================================================
// Filtering
// ============================================================================

/// Apply `state` to the library and return the narrowed, ordered result set.
pub fn filter_items<'a>(items: &'a [Item], state: &FilterState) -> Vec<&'a Item> {
    let mut results: Vec<&Item> = items.iter().filter(|item| state.matches(item)).collect();
    results.sort_by(|a, b| compare_newest_first(a, b));
    results
}

/// Date descending; unknown dates sort last; equal dates order by title.
fn compare_newest_first(a: &Item, b: &Item) -> Ordering {
    match (a.date, b.date) {
        (Some(da), Some(db)) => db.cmp(&da).then_with(|| a.title.cmp(&b.title)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    }
}

// ============================================================================
// Status Counts
// ============================================================================

/// Live counts behind the All / Unread / Read radio labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub unread: usize,
    pub read: usize,
}

/// Counts over the category+search-narrowed set, ignoring the status
/// predicate itself, so the three labels always sum consistently with the
/// visible "All" count.
pub fn status_counts(items: &[Item], state: &FilterState) -> StatusCounts {
    let narrowed = FilterState {
        status: StatusFilter::All,
        ..state.clone()
    };
    let mut counts = StatusCounts {
        all: 0,
        unread: 0,
        read: 0,
    };
    for item in items.iter().filter(|item| narrowed.matches(item)) {
        counts.all += 1;
        if item.read {
            counts.read += 1;
        } else {
            counts.unread += 1;
        }
    }
    counts
}

// ============================================================================
// Tests
// ============================================================================
