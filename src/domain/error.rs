//! Error types for the notekeeper plugin.
//!
//! [`NotekeeperError`] is the crate-wide error with a matching [`Result`] alias.
//! The two failure kinds the note session itself reasons about have their own
//! leaf types: [`ValidationError`] is raised locally before any store call, and
//! [`StoreError`] is the normalized form of every remote failure. Both end up
//! as a message in the session's error slot.

use crate::domain::note::{CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use thiserror::Error;

/// The main error type for notekeeper operations.
#[derive(Debug, Error)]
pub enum NotekeeperError {
    /// Draft fields were rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote notes store rejected a call or could not be reached.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A payload could not be encoded or decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A specialized `Result` type for notekeeper operations.
pub type Result<T> = std::result::Result<T, NotekeeperError>;

/// Draft rejected locally; no store call is made.
///
/// The `Display` text is the exact message shown in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is empty after trimming whitespace.
    #[error("Title is required.")]
    TitleRequired,

    /// Title exceeds [`TITLE_MAX_CHARS`] characters.
    #[error("Title must be at most {} characters.", TITLE_MAX_CHARS)]
    TitleTooLong,

    /// Content exceeds [`CONTENT_MAX_CHARS`] characters.
    #[error("Content must be at most {} characters.", CONTENT_MAX_CHARS)]
    ContentTooLong,
}

/// The four remote operations of the notes store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    List,
    Create,
    Update,
    Delete,
}

impl StoreOperation {
    /// User-facing message for a failure of this operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to load notes.",
            Self::Create => "Failed to create note.",
            Self::Update => "Failed to update note.",
            Self::Delete => "Failed to delete note.",
        }
    }

    /// Lowercase name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A failed store call, normalized across transports.
///
/// Displays as the operation's user-facing message; `detail` keeps the
/// underlying cause (status code, transport error, decode error) for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .operation.failure_message())]
pub struct StoreError {
    /// Operation that failed.
    pub operation: StoreOperation,

    /// HTTP status, when the store answered at all.
    pub status: Option<u16>,

    /// Diagnostic detail, never shown to the user.
    pub detail: String,
}

impl StoreError {
    /// Store answered with a non-success status.
    pub fn rejected(operation: StoreOperation, status: u16, body: &[u8]) -> Self {
        Self {
            operation,
            status: Some(status),
            detail: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Store could not be reached, or its answer could not be used.
    pub fn transport(operation: StoreOperation, detail: impl Into<String>) -> Self {
        Self {
            operation,
            status: None,
            detail: detail.into(),
        }
    }

    /// Store reported that the target note does not exist.
    pub fn not_found(operation: StoreOperation, id: impl std::fmt::Display) -> Self {
        Self {
            operation,
            status: Some(404),
            detail: format!("note {id} not found"),
        }
    }
}
