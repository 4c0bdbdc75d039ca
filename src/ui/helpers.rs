//! Shared rendering utilities.
//!
//! Cursor positioning, the few ANSI attributes the plugin uses, and
//! character-based (not byte-based) fitting of text into a column width.

/// Bold text.
pub const BOLD: &str = "\u{1b}[1m";

/// Dimmed text.
pub const DIM: &str = "\u{1b}[2m";

/// Swapped foreground/background, used for the selection.
pub const REVERSE: &str = "\u{1b}[7m";

/// Clears all attributes.
pub const RESET: &str = "\u{1b}[0m";

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Collapses line breaks so `text` renders on one row.
#[must_use]
pub fn one_line(text: &str) -> String {
    text.split(['\n', '\r'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cuts `text` to `width` characters, ending in `…` when cut, and pads it
/// with spaces to exactly `width`.
///
/// ```rust
/// use notekeeper::ui::helpers::fit;
///
/// assert_eq!(fit("abc", 5), "abc  ");
/// assert_eq!(fit("abcdef", 4), "abc…");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{text}{}", " ".repeat(width - len));
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Centers `text` in `width` columns, cutting it first if needed.
#[must_use]
pub fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count().min(width);
    let left = (width - len) / 2;
    format!("{}{}", " ".repeat(left), fit(text, width - left))
}
