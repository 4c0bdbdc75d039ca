//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O. It returns
//! `Vec<Action>` and leaves execution to the runtime: the Zellij shim turns
//! store calls into web requests, the [`Session`](crate::session::Session)
//! driver runs them against a [`NotesStore`](crate::store::NotesStore).
//!
//! # Example
//!
//! ```rust
//! use notekeeper::app::Action;
//! use notekeeper::store::{SequenceId, StoreCall, TaggedCall};
//!
//! let actions = vec![Action::Store(TaggedCall::new(SequenceId(1), StoreCall::List))];
//! ```

use crate::store::TaggedCall;

/// Commands executed by the runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Performs one store call. Its result must come back as
    /// [`Event::StoreCompleted`](crate::app::Event::StoreCompleted).
    Store(TaggedCall),
}

impl Action {
    /// The store call, if this action is one.
    #[must_use]
    pub const fn as_store_call(&self) -> Option<&TaggedCall> {
        match self {
            Self::Store(call) => Some(call),
            Self::CloseFocus => None,
        }
    }
}
