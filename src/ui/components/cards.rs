//! Note card list renderer.
//!
//! Each card takes two rows: the title, then a dimmed one-line preview of
//! the content. The selected card is drawn in reverse video across the full
//! width so the highlight survives short titles.

use crate::ui::helpers::{fit, one_line, position_cursor, BOLD, DIM, RESET, REVERSE};
use crate::ui::viewmodel::NoteCard;

/// Left margin inside a card.
const INDENT: &str = "  ";

/// Renders `cards` from `row` down. Returns the next free row.
pub fn render_cards(row: usize, cards: &[NoteCard], cols: usize) -> usize {
    let width = cols.saturating_sub(INDENT.len());
    let mut current_row = row;

    for card in cards {
        let (title_style, preview_style) = if card.is_selected {
            (format!("{REVERSE}{BOLD}"), REVERSE.to_string())
        } else {
            (BOLD.to_string(), DIM.to_string())
        };

        position_cursor(current_row, 1);
        print!("{title_style}{INDENT}{}{RESET}", fit(&one_line(&card.title), width));
        position_cursor(current_row + 1, 1);
        print!("{preview_style}{INDENT}{}{RESET}", fit(&one_line(&card.preview), width));

        current_row += 2;
    }
    current_row
}
