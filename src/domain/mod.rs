//! Domain layer for the notekeeper plugin.
//!
//! Core note types and error definitions, independent of Zellij APIs and of
//! the transport used to reach the notes store.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`note`]: Note model, drafts and validation
//!
//! # Examples
//!
//! ```
//! use notekeeper::domain::{validate, Note, ValidationError};
//!
//! let note = Note::new(1, "Groceries", "milk, eggs");
//! assert!(note.matches("milk"));
//! assert_eq!(validate(" ", ""), Err(ValidationError::TitleRequired));
//! ```

pub mod error;
pub mod note;

pub use error::{NotekeeperError, Result, StoreError, StoreOperation, ValidationError};
pub use note::{validate, DraftField, Note, NoteDraft, NoteId, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
