//! In-process notes store.
//!
//! [`MemoryStore`] behaves like the remote collection resource: it assigns
//! numeric ids on create, keeps notes in insertion order and rejects updates
//! or deletes of unknown ids. It also records every call it receives and can
//! be told to fail a given operation, which is what the session tests rely on.

use crate::domain::{Note, NoteId, StoreError, StoreOperation};
use crate::store::backend::NotesStore;
use std::collections::HashSet;

/// In-memory [`NotesStore`] with a call log and failure injection.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Notes in store order.
    notes: Vec<Note>,

    /// Next id handed out by `create`.
    next_id: i64,

    /// Operations that currently fail with a 500.
    failing: HashSet<StoreOperation>,

    /// Every call received, in order.
    calls: Vec<StoreOperation>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
            failing: HashSet::new(),
            calls: Vec::new(),
        }
    }
}

impl MemoryStore {
    /// Creates a store holding `notes`.
    ///
    /// Ids handed out later continue after the largest numeric id present.
    #[must_use]
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let next_id = notes
            .iter()
            .filter_map(|n| match n.id {
                NoteId::Number(id) => Some(id),
                NoteId::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
            .saturating_add(1);

        Self {
            notes,
            next_id,
            ..Self::default()
        }
    }

    /// Makes every later call of `operation` fail until [`Self::recover`].
    pub fn fail(&mut self, operation: StoreOperation) {
        self.failing.insert(operation);
    }

    /// Stops failing `operation`.
    pub fn recover(&mut self, operation: StoreOperation) {
        self.failing.remove(&operation);
    }

    /// Current contents, without recording a call.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Calls received so far.
    #[must_use]
    pub fn calls(&self) -> &[StoreOperation] {
        &self.calls
    }

    fn begin(&mut self, operation: StoreOperation) -> Result<(), StoreError> {
        self.calls.push(operation);
        if self.failing.contains(&operation) {
            tracing::debug!(operation = operation.as_str(), "injected store failure");
            return Err(StoreError::rejected(operation, 500, b"injected failure"));
        }
        Ok(())
    }

    fn position(&self, operation: StoreOperation, id: &NoteId) -> Result<usize, StoreError> {
        self.notes
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| StoreError::not_found(operation, id))
    }
}

impl NotesStore for MemoryStore {
    fn list(&mut self) -> Result<Vec<Note>, StoreError> {
        self.begin(StoreOperation::List)?;
        tracing::debug!(count = self.notes.len(), "listed notes");
        Ok(self.notes.clone())
    }

    fn create(&mut self, title: &str, content: &str) -> Result<(), StoreError> {
        self.begin(StoreOperation::Create)?;
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.notes.push(Note::new(id, title, content));
        tracing::debug!(note_id = id, "note created");
        Ok(())
    }

    fn update(&mut self, id: &NoteId, title: &str, content: &str) -> Result<(), StoreError> {
        self.begin(StoreOperation::Update)?;
        let index = self.position(StoreOperation::Update, id)?;
        let note = &mut self.notes[index];
        title.clone_into(&mut note.title);
        content.clone_into(&mut note.content);
        tracing::debug!(note_id = %id, "note updated");
        Ok(())
    }

    fn delete(&mut self, id: &NoteId) -> Result<(), StoreError> {
        self.begin(StoreOperation::Delete)?;
        let index = self.position(StoreOperation::Delete, id)?;
        self.notes.remove(index);
        tracing::debug!(note_id = %id, "note deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_continue_after_seeded_notes() {
        let mut store = MemoryStore::with_notes(vec![Note::new(4, "a", ""), Note::new("x", "b", "")]);
        store.create("c", "").unwrap();
        assert_eq!(store.notes()[2].id, NoteId::Number(5));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut store = MemoryStore::default();
        let err = store.delete(&NoteId::Number(9)).unwrap_err();
        assert_eq!(err.status, Some(404));
        assert_eq!(err.operation, StoreOperation::Delete);
    }

    #[test]
    fn injected_failures_are_logged_and_recoverable() {
        let mut store = MemoryStore::with_notes(vec![Note::new(1, "a", "")]);
        store.fail(StoreOperation::List);
        assert!(store.list().is_err());
        store.recover(StoreOperation::List);
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.calls(), &[StoreOperation::List, StoreOperation::List]);
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let mut store = MemoryStore::with_notes(vec![Note::new(1, "a", "b"), Note::new(2, "c", "d")]);
        store.update(&NoteId::Number(1), "A", "B").unwrap();
        assert_eq!(store.notes()[0], Note::new(1, "A", "B"));
        assert_eq!(store.notes()[1].id, NoteId::Number(2));
    }
}
