//! Notes store abstraction.
//!
//! [`NotesStore`] is the four-operation contract of the remote collection
//! resource. The trait is deliberately minimal: every method maps to one
//! remote call, is attempted once and reports failure as a [`StoreError`]
//! carrying the operation's user-facing message.

use crate::domain::{Note, NoteId, StoreError};

/// Remote collection of notes.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::store::MemoryStore): in-process store with failure
///   injection, used by tests and the [`Session`](crate::session::Session) driver
///
/// The Zellij plugin does not go through this trait: it sends the same calls
/// as HTTP requests (see [`StoreCall::to_request`](crate::store::StoreCall::to_request))
/// and receives the results as events.
///
/// # Examples
///
/// ```
/// use notekeeper::store::{MemoryStore, NotesStore};
///
/// let mut store = MemoryStore::default();
/// store.create("Todo", "buy milk")?;
/// assert_eq!(store.list()?.len(), 1);
/// # Ok::<(), notekeeper::domain::StoreError>(())
/// ```
pub trait NotesStore {
    /// Returns every note, in the store's order.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-success answer or transport failure.
    fn list(&mut self) -> Result<Vec<Note>, StoreError>;

    /// Creates a note. The new note's id is assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-success answer or transport failure.
    fn create(&mut self, title: &str, content: &str) -> Result<(), StoreError>;

    /// Replaces the title and content of note `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the note does not exist or the call fails.
    fn update(&mut self, id: &NoteId, title: &str, content: &str) -> Result<(), StoreError>;

    /// Deletes note `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the note does not exist or the call fails.
    fn delete(&mut self, id: &NoteId) -> Result<(), StoreError>;
}
