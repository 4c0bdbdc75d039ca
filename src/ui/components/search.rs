//! Search bar component renderer.

use crate::ui::helpers::{fit, position_cursor, BOLD, DIM, RESET};
use crate::ui::viewmodel::SearchBarInfo;

/// Placeholder shown while the term is empty and the field is not focused.
const PLACEHOLDER: &str = "Search notes";

/// Renders the one-line search field at `row`. Returns the next free row.
///
/// A trailing `_` marks the field as focused.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, cols: usize) -> usize {
    let width = cols.saturating_sub(2);
    position_cursor(row, 1);

    if search.is_typing {
        print!("{BOLD}/ {}{RESET}", fit(&format!("{}_", search.query), width));
    } else if search.query.is_empty() {
        print!("{DIM}/ {}{RESET}", fit(PLACEHOLDER, width));
    } else {
        print!("/ {}", fit(&search.query, width));
    }
    row + 1
}
