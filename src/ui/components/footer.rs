//! Footer component renderer.
//!
//! Key hints for the current mode, centred and dimmed. A pending error takes
//! their place in bold. Text wider than the pane is cut rather than wrapped
//! so the layout never shifts.

use crate::ui::helpers::{centered, position_cursor, BOLD, DIM, RESET};
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer line at `row`. Returns the next free row.
pub fn render_footer(row: usize, footer: &FooterInfo, cols: usize) -> usize {
    position_cursor(row, 1);
    match &footer.error {
        Some(message) => print!("{BOLD}{}{RESET}", centered(message, cols)),
        None => print!("{DIM}{}{RESET}", centered(&footer.keybindings, cols)),
    }
    row + 1
}
