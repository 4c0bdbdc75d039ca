//! Centred message shown in place of the card list.
//!
//! Used both for the first load (`Loading…`) and for the two empty-list
//! messages.

use crate::ui::helpers::{centered, position_cursor, DIM, RESET};

/// Renders `message` centred in the list area starting at `top` and spanning
/// `height` rows.
pub fn render_message(top: usize, height: usize, message: &str, cols: usize) {
    position_cursor(top + height / 2, 1);
    print!("{DIM}{}{RESET}", centered(message, cols));
}
