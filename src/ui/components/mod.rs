//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with note count
//! - [`search`]: One-line search field
//! - [`cards`]: Note cards (title and preview)
//! - [`empty`]: Centred loading/empty message
//! - [`overlay`]: Editor and delete confirmation modals
//! - [`footer`]: Key hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Search bar]
//! [Border]
//! [Cards, or a centred message]
//! [Border]
//! [Footer]
//! ```
//!
//! An overlay, when present, is drawn last on top of the list.

pub mod cards;
pub mod empty;
pub mod footer;
pub mod header;
pub mod overlay;
pub mod search;

use crate::ui::helpers::{position_cursor, DIM, RESET};
use crate::ui::viewmodel::{ListBody, NotesViewModel, Overlay};

/// Renders a horizontal border at `row`. Returns the next free row.
fn render_border(row: usize, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{DIM}{}{RESET}", "─".repeat(cols));
    row + 1
}

/// Renders the full layout for `vm` into a `rows` x `cols` pane.
pub fn render_layout(vm: &NotesViewModel, rows: usize, cols: usize) {
    let mut current_row = 1;
    current_row = header::render_header(current_row, &vm.header, cols);
    current_row = search::render_search_bar(current_row, &vm.search_bar, cols);
    current_row = render_border(current_row, cols);

    let footer_row = rows.max(current_row + 2);
    let list_height = footer_row.saturating_sub(current_row + 1);

    match &vm.body {
        ListBody::Loading => empty::render_message(current_row, list_height, "Loading…", cols),
        ListBody::Empty(state) => empty::render_message(current_row, list_height, &state.message, cols),
        ListBody::Cards { cards, .. } => {
            cards::render_cards(current_row, cards, cols);
        }
    }

    render_border(footer_row - 1, cols);
    footer::render_footer(footer_row, &vm.footer, cols);

    match &vm.overlay {
        Some(Overlay::Editor(editor)) => overlay::render_editor(editor, rows, cols),
        Some(Overlay::ConfirmDelete(confirm)) => overlay::render_confirm(confirm, rows, cols),
        None => {}
    }
}
