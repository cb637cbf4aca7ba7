//! Utility functions shared across the crate.
//!
//! - **Stable keys**: deterministic identifiers for rows and widgets,
//!   derived by hashing
//! - **Text processing**: control-character stripping and width-aware
//!   truncation for terminal output

use std::borrow::Cow;

use sha2::{Digest, Sha256};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Derives a stable, namespaced key from an arbitrary string.
///
/// The result is `{prefix}-{hex sha256(value)}`. The same input always
/// produces the same output across runs and platforms, so repeated renders
/// address the same logical control, and collisions are negligible at any
/// realistic item count. Distinct prefixes never collide with each other
/// because the prefix sits outside the digest.
pub fn stable_key(prefix: &str, value: &str) -> String {
    let hash = Sha256::digest(value.as_bytes());
    format!("{}-{:x}", prefix, hash)
}

/// Removes control characters from a string before terminal display.
///
/// Spreadsheet cells are untrusted input; a title containing an ANSI escape
/// could corrupt the listing output. Strips ESC, DEL, and C0 controls except
/// tab. Newlines collapse to a space so one row stays on one line.
///
/// Returns `Cow::Borrowed` when nothing needs stripping.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let needs_strip = s
        .chars()
        .any(|c| c == '\u{7f}' || (c.is_control() && c != '\t'));
    if !needs_strip {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' | '\r' => out.push(' '),
            '\u{7f}' => {}
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Ellipsis appended when truncation cuts text off
const ELLIPSIS: &str = "...";

/// Truncates a string to fit within `max_width` terminal columns.
///
/// Width-aware (CJK characters and emoji occupy two columns). When the
/// string fits, it is returned borrowed; otherwise characters are kept up
/// to the last point where "..." still fits.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if UnicodeWidthStr::width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS.len() {
        let mut out = String::new();
        let mut used = 0;
        for c in s.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w > max_width {
                break;
            }
            used += w;
            out.push(c);
        }
        return Cow::Owned(out);
    }

    let budget = max_width - ELLIPSIS.len();
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

// ============================================================================
// Tests
// ============================================================================
