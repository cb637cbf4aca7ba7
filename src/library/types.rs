use chrono::NaiveDate;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while loading the article spreadsheet.
///
/// All variants are fatal to the current render pass: the dashboard shows
/// either the complete listing or nothing, never a partial load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// One or more required columns are absent from the header row.
    #[error("Source file is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The file exists but its contents could not be parsed as CSV.
    #[error("Failed to parse source file: {0}")]
    Csv(#[from] csv::Error),

    /// The file could not be read at all.
    #[error("Failed to read source file: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Data Structures
// ============================================================================

/// A single reading-list entry, built fresh from the spreadsheet on every
/// load and merged with the read-status store.
///
/// `key` is derived from the source row (URL, or an author+title hash when
/// the URL is empty) and is stable across reloads of the same logical item;
/// it is the join column against the read-status store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    /// Publication date; `None` when the source cell was empty or
    /// unparseable. Sorts as oldest/unknown, displays as a placeholder.
    pub date: Option<NaiveDate>,
    pub author: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub url: String,
    /// One of the 20-class taxonomy labels (see `categories`).
    pub category: String,
    /// Merged from the read-status store; defaults to false.
    pub read: bool,
}
