//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`NotesViewModel`] from state, then
//! hand it to the component layout. Output goes to stdout, which Zellij
//! paints into the plugin pane.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::NotesViewModel;

/// Renders `state` into a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel: NotesViewModel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, rows, cols);
}
