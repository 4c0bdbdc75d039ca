//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → NotesViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view of a session
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Per-area renderers
//! - [`helpers`]: ANSI attributes and text fitting

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{
    ConfirmOverlay, EditorOverlay, EmptyState, FooterInfo, HeaderInfo, ListBody, NoteCard,
    NotesViewModel, Overlay, SearchBarInfo,
};
