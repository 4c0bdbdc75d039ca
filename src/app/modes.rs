//! Interaction mode state machine types.
//!
//! Exactly one [`InteractionMode`] is active at a time:
//! - **Browsing**: no modal; the note list and search bar take input
//! - **Editing**: the editor modal is open, in create or edit form
//! - **`ConfirmingDelete`**: the delete confirmation modal is open
//!
//! Both modals are only reachable from Browsing, so they never stack. The
//! editor's draft lives inside [`Editor`] and disappears with it.
//!
//! # Example
//!
//! ```rust
//! use notekeeper::app::modes::{Editor, InteractionMode};
//! use notekeeper::domain::Note;
//!
//! let mode = InteractionMode::Editing(Editor::edit(&Note::new(1, "Groceries", "milk")));
//! assert_eq!(mode.editor().map(Editor::heading), Some("Edit Note"));
//! ```

use crate::domain::{DraftField, Note, NoteDraft, NoteId};
use crate::store::SequenceId;

/// Focus of the search bar while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    /// Keys act on the note list.
    #[default]
    Idle,

    /// Keys edit the search term.
    Typing,
}

/// State of the open editor modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    /// `None` creates a new note; `Some` edits this note.
    pub target: Option<Note>,

    /// Unsaved title and content.
    pub draft: NoteDraft,

    /// Field receiving typed characters.
    pub focus: DraftField,

    /// Sequence started by the last accepted submit, until it settles.
    pub pending: Option<SequenceId>,
}

impl Editor {
    /// Empty editor for a new note.
    #[must_use]
    pub fn create() -> Self {
        Self {
            target: None,
            draft: NoteDraft::default(),
            focus: DraftField::Title,
            pending: None,
        }
    }

    /// Editor pre-filled from `note`.
    #[must_use]
    pub fn edit(note: &Note) -> Self {
        Self {
            target: Some(note.clone()),
            draft: NoteDraft::from_note(note),
            focus: DraftField::Title,
            pending: None,
        }
    }

    #[must_use]
    pub const fn is_create(&self) -> bool {
        self.target.is_none()
    }

    #[must_use]
    pub const fn heading(&self) -> &'static str {
        if self.is_create() {
            "Create Note"
        } else {
            "Edit Note"
        }
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.is_create() {
            "Create"
        } else {
            "Save"
        }
    }
}

/// Which modal surface, if any, is visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Browsing,
    Editing(Editor),
    ConfirmingDelete {
        target: NoteId,
    },
}

impl InteractionMode {
    #[must_use]
    pub const fn is_browsing(&self) -> bool {
        matches!(self, Self::Browsing)
    }

    #[must_use]
    pub const fn editor(&self) -> Option<&Editor> {
        match self {
            Self::Editing(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        match self {
            Self::Editing(editor) => Some(editor),
            _ => None,
        }
    }

    /// Short name for log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Editing(_) => "editing",
            Self::ConfirmingDelete { .. } => "confirming_delete",
        }
    }
}
