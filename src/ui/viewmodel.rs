//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: counts are formatted,
//! previews cut, the card window chosen and the overlay resolved.
//!
//! # Example
//!
//! ```rust
//! use notekeeper::domain::Note;
//! use notekeeper::ui::viewmodel::NoteCard;
//!
//! let card = NoteCard::new(&Note::new(1, "Groceries", "milk, eggs"), true);
//! assert_eq!(card.preview, "milk, eggs");
//! ```

use crate::domain::{DraftField, Note};

/// Content characters shown on a card before it is cut.
pub const PREVIEW_CHARS: usize = 120;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub body: ListBody,

    /// Modal drawn over the list, if any.
    pub overlay: Option<Overlay>,

    pub footer: FooterInfo,
}

/// Title bar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether keystrokes currently go to the search term.
    pub is_typing: bool,
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// First load still outstanding.
    Loading,

    /// No card to show, with the reason.
    Empty(EmptyState),

    /// The visible window of note cards.
    Cards {
        cards: Vec<NoteCard>,
        /// Selection relative to `cards`.
        selected_index: usize,
    },
}

/// Empty-list message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// One note in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub title: String,

    /// Content cut to [`PREVIEW_CHARS`] characters, `…` appended when cut.
    pub preview: String,

    pub is_selected: bool,
}

impl NoteCard {
    #[must_use]
    pub fn new(note: &Note, is_selected: bool) -> Self {
        Self {
            title: note.title.clone(),
            preview: preview(&note.content),
            is_selected,
        }
    }
}

/// Cuts `content` to [`PREVIEW_CHARS`] characters.
#[must_use]
pub fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let mut cut: String = content.chars().take(PREVIEW_CHARS).collect();
        cut.push('…');
        cut
    } else {
        content.to_string()
    }
}

/// Modal surface drawn over the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Editor(EditorOverlay),
    ConfirmDelete(ConfirmOverlay),
}

/// Editor modal contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOverlay {
    /// `Create Note` or `Edit Note`.
    pub heading: String,

    /// `Create` or `Save`.
    pub submit_label: String,

    pub title: String,
    pub content: String,
    pub focus: DraftField,

    /// Current error slot message.
    pub error: Option<String>,

    /// A submit is outstanding.
    pub saving: bool,
}

/// Delete confirmation modal contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOverlay {
    pub prompt: String,

    /// Title of the note about to be deleted, if it is still in the collection.
    pub note_title: Option<String>,
}

/// Footer key hints, replaced by the error slot message outside the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
    pub error: Option<String>,
}
