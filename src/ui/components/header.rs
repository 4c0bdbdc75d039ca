//! Header component renderer.

use crate::ui::helpers::{centered, position_cursor, BOLD, RESET};
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar centred at `row`. Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{BOLD}{}{RESET}", centered(&header.title, cols));
    row + 1
}
