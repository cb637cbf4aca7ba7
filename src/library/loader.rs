//! Spreadsheet loader: CSV rows in, typed `Item` records out.
//!
//! The loader fails closed — a missing column or unreadable file aborts the
//! whole load — but is lenient about individual cell contents: a malformed
//! date becomes `None` rather than sinking the listing.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use super::types::{Item, LoadError};
use crate::store::ReadStatusStore;
use crate::util::stable_key;

/// Columns the source file must carry. Matching is exact on the header text.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Date",
    "Author",
    "Title",
    "Subtitle",
    "URL",
    "Category (20-class)",
];

/// Date formats accepted from spreadsheet exports, tried in order. Anything
/// longer (e.g. a full timestamp) falls back to its first ten characters.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// ============================================================================
// Column Layout
// ============================================================================

/// Resolved positions of the required columns within the header row.
struct Columns {
    date: usize,
    author: usize,
    title: usize,
    subtitle: usize,
    url: usize,
    category: usize,
}

impl Columns {
    /// Locate every required column, reporting all absences at once so the
    /// user fixes the file in one round trip.
    fn locate(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let date = find("Date");
        let author = find("Author");
        let title = find("Title");
        let subtitle = find("Subtitle");
        let url = find("URL");
        let category = find("Category (20-class)");

        match (date, author, title, subtitle, url, category) {
            (Some(date), Some(author), Some(title), Some(subtitle), Some(url), Some(category)) => {
                Ok(Self {
                    date,
                    author,
                    title,
                    subtitle,
                    url,
                    category,
                })
            }
            _ => {
                let found = [date, author, title, subtitle, url, category];
                let missing = REQUIRED_COLUMNS
                    .iter()
                    .zip(found)
                    .filter(|(_, pos)| pos.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                Err(LoadError::MissingColumns { missing })
            }
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parse the article spreadsheet into items.
///
/// Rows are deduplicated by derived key, keeping the **last** occurrence —
/// the same rule the read-status store applies — so re-exported rows update
/// in place. Rows with no derivable key (URL, author, and title all empty)
/// are skipped with a warning.
pub fn load_items(path: &Path) -> Result<Vec<Item>, LoadError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let cols = Columns::locate(&headers)?;

    let mut items: Vec<Item> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let url = cell(cols.url);
        let author = cell(cols.author);
        let title = cell(cols.title);

        let Some(key) = derive_key(url, author, title) else {
            skipped += 1;
            continue;
        };

        let subtitle = match cell(cols.subtitle) {
            "" => None,
            s => Some(s.to_string()),
        };

        let item = Item {
            key,
            date: parse_date(cell(cols.date)),
            author: author.to_string(),
            title: title.to_string(),
            subtitle,
            url: url.to_string(),
            category: cell(cols.category).to_string(),
            read: false,
        };

        if let Some(&at) = seen.get(&item.key) {
            items[at] = item;
        } else {
            seen.insert(item.key.clone(), items.len());
            items.push(item);
        }
    }

    if skipped > 0 {
        tracing::warn!(
            path = %path.display(),
            skipped,
            "Skipped rows with no derivable key (URL, author, and title all empty)"
        );
    }
    tracing::debug!(path = %path.display(), count = items.len(), "Loaded library");

    Ok(items)
}

/// Derive the stable item key from a source row.
///
/// The trimmed URL wins when present; otherwise the key is a hash of
/// `author|title`. One strategy for both row dedup and the store join —
/// splitting them would let the persisted flags drift from the listing.
pub fn derive_key(url: &str, author: &str, title: &str) -> Option<String> {
    let url = url.trim();
    if !url.is_empty() {
        return Some(url.to_string());
    }
    let author = author.trim();
    let title = title.trim();
    if author.is_empty() && title.is_empty() {
        return None;
    }
    Some(stable_key("item", &format!("{}|{}", author, title)))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    // Timestamp forms ("2024-03-01T09:30:00", "2024-03-01 09:30:00")
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

// ============================================================================
// Read-Status Merge
// ============================================================================

/// Left join against the read-status mapping: items without a matching key
/// stay unread.
pub fn merge_read_status(items: &mut [Item], read_map: &HashMap<String, bool>) {
    for item in items.iter_mut() {
        item.read = read_map.get(&item.key).copied().unwrap_or(false);
    }
}

/// Load the spreadsheet and merge persisted read flags in one pass.
///
/// Store corruption never blocks the listing — `ReadStatusStore::load`
/// degrades to an empty mapping on its own.
pub fn load_merged(path: &Path, store: &ReadStatusStore) -> Result<Vec<Item>, LoadError> {
    let mut items = load_items(path)?;
    let read_map = store.load();
    merge_read_status(&mut items, &read_map);
    Ok(items)
}

// ============================================================================
// Tests
// ============================================================================
