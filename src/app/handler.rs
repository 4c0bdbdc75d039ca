//! Event handling and state transition logic.
//!
//! [`handle_event`] is the one entry point through which the runtime changes
//! a session. It pattern-matches the event, mutates [`AppState`] through its
//! operations and returns whether a re-render is due together with the
//! [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `SessionStarted`, `Reload`, `CloseFocus`
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Input** (routed by mode): `Char`, `Backspace`, `Enter`, `Tab`, `Cancel`
//! - **Search**: `SearchMode`, `ExitSearch`, `SetSearch`
//! - **Editor**: `NewNote`, `EditSelected`, `EditNote`, `SetDraft`, `Submit`
//! - **Delete**: `DeleteSelected`, `DeleteNote`, `ConfirmDelete`
//! - **Store**: `StoreCompleted` with the reply of an earlier `Action::Store`
//!
//! # Example
//!
//! ```rust
//! use notekeeper::app::{handle_event, AppState, Event, SessionSettings};
//!
//! let mut state = AppState::new(SessionSettings::default());
//! let (render, actions) = handle_event(&mut state, &Event::SessionStarted)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), notekeeper::domain::NotekeeperError>(())
//! ```

use crate::app::modes::{InteractionMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{DraftField, NoteId};
use crate::observability::TraceContext;
use crate::store::StoreReply;

/// Events triggered by user input, the runtime, or finished store calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The session may reach the store; runs the initial refresh.
    SessionStarted,
    /// User-requested refresh.
    Reload,
    /// Hides the plugin pane.
    CloseFocus,

    /// Moves selection down one card (wraps to top).
    KeyDown,
    /// Moves selection up one card (wraps to bottom).
    KeyUp,

    /// Typed character; goes to the draft or the search term by mode.
    Char(char),
    /// Deletes the last character of the draft field or search term.
    Backspace,
    /// Enter key: next field or newline in the editor, leaves the search
    /// field, confirms a delete, or opens the selected note.
    Enter,
    /// Switches the focused draft field.
    Tab,
    /// Escape: closes the open modal or leaves/clears the search.
    Cancel,

    /// Focuses the search field.
    SearchMode,
    /// Leaves the search field, keeping the term.
    ExitSearch,
    /// Replaces the search term.
    SetSearch(String),

    /// Opens the editor for a new note.
    NewNote,
    /// Opens the editor on the selected card.
    EditSelected,
    /// Opens the editor on a given note.
    EditNote(NoteId),
    /// Replaces one draft field.
    SetDraft { field: DraftField, value: String },
    /// Submits the editor.
    Submit,

    /// Asks to delete the selected card.
    DeleteSelected,
    /// Asks to delete a given note.
    DeleteNote(NoteId),
    /// Confirms the pending delete.
    ConfirmDelete,

    /// Result of an `Action::Store` call.
    StoreCompleted(StoreReply),
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// Returns `(render, actions)`; `render` is `true` when visible state may
/// have changed.
///
/// # Errors
///
/// Reserved for runtime failures; every session-level failure ends in the
/// state's error slot instead.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, mode = state.mode.name()).entered();

    match event {
        Event::SessionStarted | Event::Reload => Ok((true, state.refresh())),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::KeyDown => {
            if !state.mode.is_browsing() {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if !state.mode.is_browsing() {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }

        Event::Char(c) => Ok((type_char(state, *c), vec![])),
        Event::Backspace => Ok((erase_char(state), vec![])),
        Event::Enter => Ok(enter(state)),
        Event::Tab => Ok((state.toggle_draft_focus(), vec![])),
        Event::Cancel => Ok((cancel(state), vec![])),

        Event::SearchMode => {
            if !state.mode.is_browsing() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search field");
            state.search_focus = SearchFocus::Typing;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.search_focus = SearchFocus::Idle;
            Ok((true, vec![]))
        }
        Event::SetSearch(term) => {
            state.set_search_term(term);
            Ok((true, vec![]))
        }

        Event::NewNote => Ok((state.open_create(), vec![])),
        Event::EditSelected => Ok((state.open_selected(), vec![])),
        Event::EditNote(id) => Ok((state.open_edit(id), vec![])),
        Event::SetDraft { field, value } => Ok((state.set_draft(*field, value), vec![])),
        Event::Submit => Ok((true, state.submit_editor())),

        Event::DeleteSelected => Ok((state.request_delete_selected(), vec![])),
        Event::DeleteNote(id) => Ok((state.request_delete(id), vec![])),
        Event::ConfirmDelete => Ok((true, state.confirm_delete())),

        Event::StoreCompleted(reply) => {
            let _context = reply.trace_context.as_ref().and_then(TraceContext::attach);
            tracing::debug!(
                sequence = %reply.sequence,
                operation = reply.call.operation().as_str(),
                ok = reply.outcome.is_ok(),
                "store call completed"
            );
            Ok((true, state.complete(reply.clone())))
        }
    }
}

/// Where keyboard input goes in the current state.
enum Focus {
    Editor(DraftField),
    Confirm,
    SearchField,
    List,
}

fn focus(state: &AppState) -> Focus {
    match &state.mode {
        InteractionMode::Editing(editor) => Focus::Editor(editor.focus),
        InteractionMode::ConfirmingDelete { .. } => Focus::Confirm,
        InteractionMode::Browsing if state.search_focus == SearchFocus::Typing => Focus::SearchField,
        InteractionMode::Browsing => Focus::List,
    }
}

fn type_char(state: &mut AppState, c: char) -> bool {
    match focus(state) {
        Focus::Editor(_) => state.draft_push(c),
        Focus::SearchField => {
            state.search_term.push(c);
            tracing::trace!(term = %state.search_term, "search term updated");
            state.apply_search_filter();
            true
        }
        Focus::Confirm | Focus::List => false,
    }
}

fn erase_char(state: &mut AppState) -> bool {
    match focus(state) {
        Focus::Editor(_) => state.draft_pop(),
        Focus::SearchField => {
            if state.search_term.pop().is_none() {
                return false;
            }
            state.apply_search_filter();
            true
        }
        Focus::Confirm | Focus::List => false,
    }
}

fn enter(state: &mut AppState) -> (bool, Vec<Action>) {
    match focus(state) {
        Focus::Editor(DraftField::Title) => (state.toggle_draft_focus(), vec![]),
        Focus::Editor(DraftField::Content) => (state.draft_push('\n'), vec![]),
        Focus::Confirm => (true, state.confirm_delete()),
        Focus::SearchField => {
            state.search_focus = SearchFocus::Idle;
            (true, vec![])
        }
        Focus::List => (state.open_selected(), vec![]),
    }
}

fn cancel(state: &mut AppState) -> bool {
    match focus(state) {
        Focus::Editor(_) => state.cancel_editor(),
        Focus::Confirm => state.cancel_delete(),
        Focus::SearchField => {
            state.search_focus = SearchFocus::Idle;
            true
        }
        Focus::List if !state.search_term.is_empty() => {
            tracing::debug!("search term cleared");
            state.set_search_term("");
            true
        }
        Focus::List => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionSettings;
    use crate::domain::Note;
    use crate::store::{StoreCall, StoreOutput};

    fn started(notes: Vec<Note>) -> AppState {
        let mut state = AppState::new(SessionSettings::default());
        let (_, actions) = handle_event(&mut state, &Event::SessionStarted).unwrap();
        let Some(Action::Store(call)) = actions.into_iter().next() else {
            panic!("expected initial refresh");
        };
        let reply = call.reply(Ok(StoreOutput::Listed(notes)));
        handle_event(&mut state, &Event::StoreCompleted(reply)).unwrap();
        state
    }

    fn send(state: &mut AppState, events: &[Event]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|event| handle_event(state, event).unwrap().1)
            .collect()
    }

    #[test]
    fn session_start_issues_one_list_call() {
        let mut state = AppState::new(SessionSettings::default());
        let (render, actions) = handle_event(&mut state, &Event::SessionStarted).unwrap();
        assert!(render);
        assert!(matches!(
            actions.as_slice(),
            [Action::Store(call)] if call.call == StoreCall::List
        ));
    }

    #[test]
    fn typing_goes_to_search_only_when_focused() {
        let mut state = started(vec![Note::new(1, "Groceries", "milk"), Note::new(2, "Work", "")]);

        send(&mut state, &[Event::Char('m')]);
        assert_eq!(state.search_term, "");

        send(&mut state, &[Event::SearchMode, Event::Char('m'), Event::Char('i')]);
        assert_eq!(state.search_term, "mi");
        assert_eq!(state.filtered_notes.len(), 1);

        send(&mut state, &[Event::Backspace, Event::Backspace]);
        assert_eq!(state.filtered_notes.len(), 2);
    }

    #[test]
    fn escape_leaves_search_then_clears_term() {
        let mut state = started(vec![Note::new(1, "Groceries", "milk"), Note::new(2, "Work", "")]);
        send(&mut state, &[Event::SearchMode, Event::Char('w')]);

        send(&mut state, &[Event::Cancel]);
        assert_eq!(state.search_focus, SearchFocus::Idle);
        assert_eq!(state.search_term, "w");

        send(&mut state, &[Event::Cancel]);
        assert_eq!(state.search_term, "");
        assert_eq!(state.filtered_notes.len(), 2);
    }

    #[test]
    fn editor_keys_edit_the_focused_field() {
        let mut state = started(vec![]);
        send(
            &mut state,
            &[
                Event::NewNote,
                Event::Char('H'),
                Event::Char('i'),
                Event::Enter,
                Event::Char('a'),
                Event::Enter,
                Event::Char('b'),
            ],
        );

        let editor = state.mode.editor().expect("editor open");
        assert_eq!(editor.draft.title, "Hi");
        assert_eq!(editor.draft.content, "a\nb");
        assert_eq!(editor.focus, DraftField::Content);

        send(&mut state, &[Event::Tab]);
        assert_eq!(state.mode.editor().map(|e| e.focus), Some(DraftField::Title));
    }

    #[test]
    fn navigation_is_ignored_under_a_modal() {
        let mut state = started(vec![Note::new(1, "a", ""), Note::new(2, "b", "")]);
        send(&mut state, &[Event::NewNote]);
        let (render, _) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(!render);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn enter_opens_selected_and_submit_saves() {
        let mut state = started(vec![Note::new(7, "Groceries", "milk")]);
        send(&mut state, &[Event::Enter]);
        assert_eq!(
            state.mode.editor().and_then(|e| e.target.as_ref()).map(|n| n.id.clone()),
            Some(7.into())
        );

        let actions = send(
            &mut state,
            &[
                Event::SetDraft {
                    field: DraftField::Content,
                    value: "milk, eggs".to_string(),
                },
                Event::Submit,
            ],
        );
        assert!(matches!(
            actions.as_slice(),
            [Action::Store(call)] if call.call == StoreCall::Update {
                id: 7.into(),
                title: "Groceries".to_string(),
                content: "milk, eggs".to_string(),
            }
        ));
    }

    #[test]
    fn delete_flow_confirms_with_enter() {
        let mut state = started(vec![Note::new(5, "x", "")]);
        send(&mut state, &[Event::DeleteSelected]);
        assert_eq!(state.mode, InteractionMode::ConfirmingDelete { target: 5.into() });

        let actions = send(&mut state, &[Event::Enter]);
        assert!(state.mode.is_browsing());
        assert!(matches!(
            actions.as_slice(),
            [Action::Store(call)] if call.call == StoreCall::Delete { id: 5.into() }
        ));
    }

    #[test]
    fn cancel_closes_delete_confirmation() {
        let mut state = started(vec![Note::new(5, "x", "")]);
        send(&mut state, &[Event::DeleteNote(5.into()), Event::Cancel]);
        assert!(state.mode.is_browsing());
    }

    #[test]
    fn close_focus_emits_action_without_render() {
        let mut state = started(vec![]);
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
