//! End-to-end session behaviour against the in-memory store.

use notekeeper::app::{filter, Action, EmptyKind, Event, InteractionMode, SessionSettings};
use notekeeper::domain::{DraftField, Note, StoreOperation};
use notekeeper::session::Session;
use notekeeper::store::{execute, MemoryStore, StoreCall, TaggedCall};
use notekeeper::ui::ListBody;
use notekeeper::{handle_event, AppState};

fn groceries() -> Vec<Note> {
    vec![Note::new(1, "Groceries", "milk, eggs")]
}

fn started(store: MemoryStore) -> Session<MemoryStore> {
    let mut session = Session::new(store, SessionSettings::default());
    session.start().unwrap();
    session
}

fn type_text(session: &mut Session<MemoryStore>, text: &str) {
    for c in text.chars() {
        session.dispatch(&Event::Char(c)).unwrap();
    }
}

#[test]
fn search_keeps_matching_notes() {
    let mut session = started(MemoryStore::with_notes(groceries()));
    session.dispatch(&Event::SetSearch("milk".to_string())).unwrap();

    assert_eq!(session.state().filtered_notes, groceries());
}

#[test]
fn search_without_match_reports_no_matches() {
    let mut session = started(MemoryStore::with_notes(groceries()));
    session.dispatch(&Event::SetSearch("bread".to_string())).unwrap();

    let state = session.state();
    assert!(state.filtered_notes.is_empty());
    assert_eq!(
        EmptyKind::classify(state.notes.len(), state.filtered_notes.len()),
        Some(EmptyKind::NoMatches)
    );
    assert!(matches!(
        state.compute_viewmodel(24, 80).body,
        ListBody::Empty(ref empty) if empty.message == "No notes found for search."
    ));
}

#[test]
fn blank_title_blocks_create() {
    let mut session = started(MemoryStore::default());
    session.dispatch(&Event::NewNote).unwrap();
    session
        .dispatch(&Event::SetDraft {
            field: DraftField::Content,
            value: "x".to_string(),
        })
        .unwrap();
    session.dispatch(&Event::Submit).unwrap();

    assert_eq!(session.store().calls(), &[StoreOperation::List]);
    assert_eq!(session.state().error.as_deref(), Some("Title is required."));
    assert!(matches!(&session.state().mode, InteractionMode::Editing(editor) if editor.target.is_none()));
}

#[test]
fn create_grows_collection_and_closes_editor() {
    let mut session = started(MemoryStore::with_notes(groceries()));
    session.dispatch(&Event::NewNote).unwrap();
    type_text(&mut session, "Todo");
    session.dispatch(&Event::Tab).unwrap();
    type_text(&mut session, "buy milk");
    session.dispatch(&Event::Submit).unwrap();

    let state = session.state();
    assert_eq!(state.notes.len(), 2);
    assert!(state.notes.iter().any(|n| n.title == "Todo" && n.content == "buy milk"));
    assert!(state.mode.is_browsing());
    assert_eq!(state.error, None);
}

#[test]
fn failed_delete_still_refreshes() {
    let notes = vec![Note::new(5, "Keep me", "")];
    let mut store = MemoryStore::with_notes(notes.clone());
    store.fail(StoreOperation::Delete);
    let mut session = started(store);

    session.dispatch(&Event::DeleteNote(5.into())).unwrap();
    session.dispatch(&Event::ConfirmDelete).unwrap();

    let state = session.state();
    assert_eq!(state.notes, notes);
    assert_eq!(state.error.as_deref(), Some("Failed to delete note."));
    assert!(state.mode.is_browsing());
    assert_eq!(
        session.store().calls(),
        &[StoreOperation::List, StoreOperation::Delete, StoreOperation::List]
    );
}

#[test]
fn failed_update_closes_editor_by_default() {
    let mut store = MemoryStore::with_notes(groceries());
    store.fail(StoreOperation::Update);
    let mut session = started(store);

    session.dispatch(&Event::EditSelected).unwrap();
    type_text(&mut session, "!");
    session.dispatch(&Event::Submit).unwrap();

    assert!(session.state().mode.is_browsing());
    assert_eq!(session.state().error.as_deref(), Some("Failed to update note."));
    assert_eq!(session.state().notes, groceries());
}

#[test]
fn failed_update_keeps_editor_when_configured() {
    let mut store = MemoryStore::with_notes(groceries());
    store.fail(StoreOperation::Update);
    let mut session = Session::new(
        store,
        SessionSettings {
            close_on_mutation_failure: false,
            serialize_mutations: false,
        },
    );
    session.start().unwrap();

    session.dispatch(&Event::EditSelected).unwrap();
    type_text(&mut session, "!");
    session.dispatch(&Event::Submit).unwrap();

    let editor = session.state().mode.editor().expect("editor stays open");
    assert_eq!(editor.draft.title, "Groceries!");
    assert_eq!(editor.pending, None);

    session.store_mut().recover(StoreOperation::Update);
    session.dispatch(&Event::Submit).unwrap();
    assert!(session.state().mode.is_browsing());
    assert_eq!(session.state().notes[0].title, "Groceries!");
}

#[test]
fn saved_create_with_failed_refresh_is_not_created_twice() {
    let mut store = MemoryStore::with_notes(vec![Note::new(1, "a", "")]);
    store.fail(StoreOperation::List);
    let mut session = Session::new(
        store,
        SessionSettings {
            close_on_mutation_failure: false,
            serialize_mutations: false,
        },
    );
    session.start().unwrap();

    session.dispatch(&Event::NewNote).unwrap();
    type_text(&mut session, "Todo");
    session.dispatch(&Event::Submit).unwrap();

    assert!(session.state().mode.is_browsing());
    assert_eq!(session.state().error.as_deref(), Some("Failed to load notes."));

    session.store_mut().recover(StoreOperation::List);
    session.dispatch(&Event::Submit).unwrap();
    session.dispatch(&Event::Reload).unwrap();

    let titles: Vec<&str> = session.state().notes.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["a", "Todo"]);
}

#[test]
fn repeated_refresh_is_idempotent() {
    let mut session = started(MemoryStore::with_notes(vec![
        Note::new(1, "a", "x"),
        Note::new(2, "b", "y"),
    ]));
    let first = session.state().notes.clone();
    session.refresh().unwrap();

    assert_eq!(session.state().notes, first);
}

#[test]
fn failed_refresh_keeps_collection() {
    let mut session = started(MemoryStore::with_notes(groceries()));
    session.store_mut().fail(StoreOperation::List);
    session.dispatch(&Event::Reload).unwrap();

    assert_eq!(session.state().notes, groceries());
    assert_eq!(session.state().error.as_deref(), Some("Failed to load notes."));
    assert!(!session.state().loading);

    session.store_mut().recover(StoreOperation::List);
    session.dispatch(&Event::Reload).unwrap();
    assert_eq!(session.state().error, None);
}

#[test]
fn filter_matches_what_the_session_shows() {
    let notes = vec![
        Note::new(1, "Groceries", "milk, eggs"),
        Note::new(2, "Work", "quarterly report"),
        Note::new(3, "Reading", "Milk and Honey"),
    ];
    let mut session = started(MemoryStore::with_notes(notes.clone()));
    session.dispatch(&Event::SetSearch("  MILK ".to_string())).unwrap();

    let expected: Vec<Note> = filter(&notes, "  MILK ").into_iter().cloned().collect();
    assert_eq!(session.state().filtered_notes, expected);
    assert_eq!(expected.len(), 2);
}

/// Runs one store call by hand, returning the actions its reply produces.
fn settle(state: &mut AppState, store: &mut MemoryStore, tagged: TaggedCall) -> Vec<Action> {
    let outcome = execute(store, &tagged.call);
    handle_event(state, &Event::StoreCompleted(tagged.reply(outcome)))
        .unwrap()
        .1
}

fn single_call(actions: Vec<Action>) -> TaggedCall {
    match actions.as_slice() {
        [Action::Store(tagged)] => tagged.clone(),
        other => panic!("expected one store call, got {other:?}"),
    }
}

#[test]
fn overlapping_sequences_take_the_last_list_reply() {
    let mut store = MemoryStore::with_notes(groceries());
    let mut state = AppState::new(SessionSettings::default());

    let (_, first) = state.create_and_refresh("First", "").unwrap();
    let (_, second) = state.create_and_refresh("Second", "").unwrap();
    let first = single_call(first);
    let second = single_call(second);

    // Both creates land, then the lists return in reverse order.
    let list_after_first = single_call(settle(&mut state, &mut store, first));
    let list_after_second = single_call(settle(&mut state, &mut store, second));
    assert_eq!(list_after_first.call, StoreCall::List);

    let mut stale_store = MemoryStore::with_notes(groceries());
    settle(&mut state, &mut store, list_after_second);
    settle(&mut state, &mut stale_store, list_after_first);

    assert_eq!(state.notes, groceries());
    assert_eq!(state.outstanding_sequences(), 0);
    assert!(!state.loading);
}

#[test]
fn serialized_mutations_run_one_after_another() {
    let mut store = MemoryStore::default();
    let mut state = AppState::new(SessionSettings {
        close_on_mutation_failure: true,
        serialize_mutations: true,
    });

    let (_, first) = state.create_and_refresh("one", "").unwrap();
    let (_, second) = state.create_and_refresh("two", "").unwrap();
    assert!(second.is_empty());

    let list = single_call(settle(&mut state, &mut store, single_call(first)));
    let queued = single_call(settle(&mut state, &mut store, list));
    assert!(matches!(queued.call, StoreCall::Create { ref title, .. } if title == "two"));

    let list = single_call(settle(&mut state, &mut store, queued));
    assert!(settle(&mut state, &mut store, list).is_empty());

    assert_eq!(state.notes.len(), 2);
    assert_eq!(
        store.calls(),
        &[
            StoreOperation::Create,
            StoreOperation::List,
            StoreOperation::Create,
            StoreOperation::List,
        ]
    );
}
