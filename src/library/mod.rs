mod categories;
mod filter;
mod loader;
mod types;

pub use categories::{
    display_label, group_of, present_in, select_all, CategoryGroup, AI_CATEGORIES,
    NON_AI_CATEGORIES, NON_AI_PREFIX,
};
pub use filter::{filter_items, status_counts, FilterState, StatusCounts, StatusFilter};
pub use loader::{derive_key, load_items, load_merged, merge_read_status, REQUIRED_COLUMNS};
pub use types::{Item, LoadError};
