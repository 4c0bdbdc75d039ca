//! Synchronous session driver over any [`NotesStore`].
//!
//! The plugin runs store calls asynchronously through Zellij web requests.
//! [`Session`] runs the same reducer with ordinary blocking calls: every
//! `Action::Store` is executed right away and its reply is fed back until
//! no store work remains. Used by the scenario tests and by hosts that own a
//! blocking store.
//!
//! # Example
//!
//! ```rust
//! use notekeeper::app::SessionSettings;
//! use notekeeper::domain::Note;
//! use notekeeper::session::Session;
//! use notekeeper::store::MemoryStore;
//!
//! let store = MemoryStore::with_notes(vec![Note::new(1, "Groceries", "milk, eggs")]);
//! let mut session = Session::new(store, SessionSettings::default());
//! session.start()?;
//! assert_eq!(session.state().notes.len(), 1);
//! # Ok::<(), notekeeper::domain::NotekeeperError>(())
//! ```

use crate::app::{handle_event, Action, AppState, Event, SessionSettings};
use crate::domain::error::Result;
use crate::domain::NoteId;
use crate::store::{execute, NotesStore};
use std::collections::VecDeque;

/// One note session bound to a blocking store.
#[derive(Debug)]
pub struct Session<S: NotesStore> {
    state: AppState,
    store: S,
    closed: bool,
}

impl<S: NotesStore> Session<S> {
    #[must_use]
    pub fn new(store: S, settings: SessionSettings) -> Self {
        Self {
            state: AppState::new(settings),
            store,
            closed: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Whether a `CloseFocus` action has been emitted.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Handles `event` and runs every store call it causes to completion.
    ///
    /// Returns the render flag of the event itself.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        let (render, actions) = handle_event(&mut self.state, event)?;
        self.run(actions)?;
        Ok(render)
    }

    /// Runs the initial refresh.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn start(&mut self) -> Result<()> {
        self.dispatch(&Event::SessionStarted).map(|_| ())
    }

    /// Runs a standalone refresh.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn refresh(&mut self) -> Result<()> {
        self.dispatch(&Event::Reload).map(|_| ())
    }

    /// Creates a note and refreshes. A rejected draft only sets the error slot.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn create_and_refresh(&mut self, title: &str, content: &str) -> Result<()> {
        let actions = self
            .state
            .create_and_refresh(title, content)
            .map(|(_, actions)| actions)
            .unwrap_or_default();
        self.run(actions)
    }

    /// Updates note `id` and refreshes. A rejected draft only sets the error slot.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn update_and_refresh(&mut self, id: &NoteId, title: &str, content: &str) -> Result<()> {
        let actions = self
            .state
            .update_and_refresh(id, title, content)
            .map(|(_, actions)| actions)
            .unwrap_or_default();
        self.run(actions)
    }

    /// Deletes note `id` and refreshes.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn delete_and_refresh(&mut self, id: &NoteId) -> Result<()> {
        let (_, actions) = self.state.delete_and_refresh(id);
        self.run(actions)
    }

    fn run(&mut self, actions: Vec<Action>) -> Result<()> {
        let mut pending: VecDeque<Action> = actions.into();

        while let Some(action) = pending.pop_front() {
            match action {
                Action::CloseFocus => self.closed = true,
                Action::Store(tagged) => {
                    let outcome = execute(&mut self.store, &tagged.call);
                    let event = Event::StoreCompleted(tagged.reply(outcome));
                    let (_, follow_up) = handle_event(&mut self.state, &event)?;
                    pending.extend(follow_up);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, StoreOperation};
    use crate::store::MemoryStore;

    #[test]
    fn start_loads_the_store() {
        let store = MemoryStore::with_notes(vec![Note::new(1, "a", "b")]);
        let mut session = Session::new(store, SessionSettings::default());
        session.start().unwrap();

        assert_eq!(session.state().notes, vec![Note::new(1, "a", "b")]);
        assert!(!session.state().loading);
        assert_eq!(session.store().calls(), &[StoreOperation::List]);
    }

    #[test]
    fn every_mutation_is_followed_by_one_list() {
        let mut session = Session::new(MemoryStore::default(), SessionSettings::default());
        session.start().unwrap();
        session.create_and_refresh("Todo", "").unwrap();
        session.delete_and_refresh(&1.into()).unwrap();

        assert_eq!(
            session.store().calls(),
            &[
                StoreOperation::List,
                StoreOperation::Create,
                StoreOperation::List,
                StoreOperation::Delete,
                StoreOperation::List,
            ]
        );
        assert!(session.state().notes.is_empty());
    }

    #[test]
    fn rejected_draft_makes_no_call() {
        let mut session = Session::new(MemoryStore::default(), SessionSettings::default());
        session.create_and_refresh("  ", "x").unwrap();

        assert!(session.store().calls().is_empty());
        assert_eq!(session.state().error.as_deref(), Some("Title is required."));
    }

    #[test]
    fn close_focus_marks_session_closed() {
        let mut session = Session::new(MemoryStore::default(), SessionSettings::default());
        assert!(!session.dispatch(&Event::CloseFocus).unwrap());
        assert!(session.is_closed());
    }
}
