//! Session state and the operations that drive it.
//!
//! [`AppState`] is the single source of truth for one note session: the
//! collection as last synchronized, the filtered view, the search term, the
//! interaction mode, the error slot and the bookkeeping of outstanding store
//! sequences.
//!
//! # Sequences
//!
//! Every store interaction belongs to a sequence identified by a
//! [`SequenceId`]:
//!
//! - a standalone refresh is one `list` call
//! - a mutation is one `create`/`update`/`delete` call followed by one `list`
//!   call, issued only once the mutation's reply has arrived and issued
//!   whether the mutation succeeded or not
//!
//! Sequences may overlap. The collection is replaced by whichever `list`
//! reply arrives last. With `serialize_mutations` on, mutation sequences
//! are started one at a time in request order.
//!
//! # Example
//!
//! ```rust
//! use notekeeper::app::{Action, AppState, SessionSettings};
//!
//! let mut state = AppState::new(SessionSettings::default());
//! let actions = state.refresh();
//! assert!(matches!(actions.as_slice(), [Action::Store(_)]));
//! assert!(state.loading);
//! ```

use super::actions::Action;
use super::filter::{filter, EmptyKind};
use super::modes::{Editor, InteractionMode, SearchFocus};
use crate::domain::{validate, DraftField, Note, NoteId, StoreError, StoreOperation, ValidationError};
use crate::store::{SequenceId, StoreCall, StoreOutput, StoreReply, TaggedCall};
use crate::ui::viewmodel::{
    ConfirmOverlay, EditorOverlay, EmptyState, FooterInfo, HeaderInfo, ListBody, NoteCard,
    NotesViewModel, Overlay, SearchBarInfo,
};
use std::collections::{BTreeMap, VecDeque};

/// Rows taken by header, search bar, two separators and footer.
const CHROME_ROWS: usize = 5;

/// Rows taken by one note card (title and preview).
const CARD_ROWS: usize = 2;

/// Behaviour switches for mutation sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Close the editor when its sequence settles even if the mutation failed.
    pub close_on_mutation_failure: bool,

    /// Run at most one mutation sequence at a time.
    pub serialize_mutations: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            close_on_mutation_failure: true,
            serialize_mutations: false,
        }
    }
}

/// Bookkeeping for one outstanding sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Sequence {
    /// `None` for a standalone refresh.
    mutation: Option<StoreOperation>,

    /// Whether its first call has been handed to the runtime.
    started: bool,

    /// Whether its create, update or delete call failed.
    mutation_failed: bool,
}

/// Central session state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Collection as returned by the last settled `list` call.
    pub notes: Vec<Note>,

    /// `notes` passed through the search filter, in collection order.
    pub filtered_notes: Vec<Note>,

    /// Zero-based index into `filtered_notes`, clamped on every recompute.
    pub selected_index: usize,

    pub search_term: String,
    pub search_focus: SearchFocus,
    pub mode: InteractionMode,

    /// The single user-visible error message.
    pub error: Option<String>,

    /// A `list` call is outstanding, or the first one has not been issued yet.
    pub loading: bool,

    pub settings: SessionSettings,

    next_sequence: u64,
    sequences: BTreeMap<SequenceId, Sequence>,
    queued: VecDeque<TaggedCall>,
    lists_in_flight: usize,
}

impl AppState {
    /// Fresh session: empty collection, browsing, loading until the first
    /// refresh settles.
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            notes: Vec::new(),
            filtered_notes: Vec::new(),
            selected_index: 0,
            search_term: String::new(),
            search_focus: SearchFocus::Idle,
            mode: InteractionMode::Browsing,
            error: None,
            loading: true,
            settings,
            next_sequence: 1,
            sequences: BTreeMap::new(),
            queued: VecDeque::new(),
            lists_in_flight: 0,
        }
    }

    // ---- collection operations ----

    /// Starts a standalone refresh.
    ///
    /// Clears the error slot and sets `loading`. The collection is replaced
    /// when the `list` reply arrives, or kept if it fails.
    pub fn refresh(&mut self) -> Vec<Action> {
        self.error = None;
        let sequence = self.open_sequence(None);
        if let Some(entry) = self.sequences.get_mut(&sequence) {
            entry.started = true;
        }
        tracing::debug!(%sequence, "refresh requested");
        self.list_call(sequence)
    }

    /// Validates and starts a create-then-refresh sequence.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] (also placed in the error slot) when
    /// the fields are rejected; no call is made then.
    pub fn create_and_refresh(
        &mut self,
        title: &str,
        content: &str,
    ) -> Result<(SequenceId, Vec<Action>), ValidationError> {
        self.check(title, content)?;
        Ok(self.begin_mutation(StoreCall::Create {
            title: title.to_string(),
            content: content.to_string(),
        }))
    }

    /// Validates and starts an update-then-refresh sequence for `id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_and_refresh`].
    pub fn update_and_refresh(
        &mut self,
        id: &NoteId,
        title: &str,
        content: &str,
    ) -> Result<(SequenceId, Vec<Action>), ValidationError> {
        self.check(title, content)?;
        Ok(self.begin_mutation(StoreCall::Update {
            id: id.clone(),
            title: title.to_string(),
            content: content.to_string(),
        }))
    }

    /// Starts a delete-then-refresh sequence for `id`.
    pub fn delete_and_refresh(&mut self, id: &NoteId) -> (SequenceId, Vec<Action>) {
        self.begin_mutation(StoreCall::Delete { id: id.clone() })
    }

    /// Applies the reply of a call issued by this state.
    ///
    /// A mutation reply always yields the follow-up `list` call of its
    /// sequence. A `list` reply settles the sequence, which may close the
    /// editor and start the next queued mutation.
    pub fn complete(&mut self, reply: StoreReply) -> Vec<Action> {
        let StoreReply {
            sequence,
            call,
            outcome,
            ..
        } = reply;

        if !self.sequences.contains_key(&sequence) {
            tracing::warn!(%sequence, operation = call.operation().as_str(), "reply for unknown sequence ignored");
            return vec![];
        }

        if call.is_mutation() {
            if let Err(err) = outcome {
                self.record_failure(sequence, &err);
                if let Some(entry) = self.sequences.get_mut(&sequence) {
                    entry.mutation_failed = true;
                }
            }
            return self.list_call(sequence);
        }

        self.lists_in_flight = self.lists_in_flight.saturating_sub(1);
        self.loading = self.lists_in_flight > 0;

        match outcome {
            Ok(StoreOutput::Listed(notes)) => {
                tracing::debug!(%sequence, count = notes.len(), "collection replaced");
                self.notes = notes;
                self.apply_search_filter();
            }
            Ok(StoreOutput::Done) => {
                let err = StoreError::transport(StoreOperation::List, "list returned no notes");
                self.record_failure(sequence, &err);
            }
            Err(err) => self.record_failure(sequence, &err),
        }

        self.finish(sequence)
    }

    /// Sequences opened and not yet settled, queued ones included.
    #[must_use]
    pub fn outstanding_sequences(&self) -> usize {
        self.sequences.len()
    }

    fn check(&mut self, title: &str, content: &str) -> Result<(), ValidationError> {
        validate(title, content).map_err(|err| {
            tracing::debug!(error = %err, "draft rejected");
            self.error = Some(err.to_string());
            err
        })
    }

    fn open_sequence(&mut self, mutation: Option<StoreOperation>) -> SequenceId {
        let sequence = SequenceId(self.next_sequence);
        self.next_sequence += 1;
        self.sequences.insert(
            sequence,
            Sequence {
                mutation,
                started: false,
                mutation_failed: false,
            },
        );
        sequence
    }

    fn begin_mutation(&mut self, call: StoreCall) -> (SequenceId, Vec<Action>) {
        self.error = None;
        let sequence = self.open_sequence(Some(call.operation()));
        let tagged = TaggedCall::new(sequence, call);

        if self.settings.serialize_mutations && self.mutation_running() {
            tracing::debug!(%sequence, queued = self.queued.len() + 1, "mutation queued");
            self.queued.push_back(tagged);
            return (sequence, vec![]);
        }

        (sequence, self.start_mutation(tagged))
    }

    /// Hands a mutation to the runtime. The error slot belongs to it from here
    /// on, so a failure left by the sequence ahead of it is cleared.
    fn start_mutation(&mut self, tagged: TaggedCall) -> Vec<Action> {
        self.error = None;
        if let Some(entry) = self.sequences.get_mut(&tagged.sequence) {
            entry.started = true;
        }
        tracing::debug!(
            sequence = %tagged.sequence,
            operation = tagged.call.operation().as_str(),
            "mutation started"
        );
        vec![Action::Store(tagged)]
    }

    fn mutation_running(&self) -> bool {
        self.sequences
            .values()
            .any(|entry| entry.started && entry.mutation.is_some())
    }

    fn list_call(&mut self, sequence: SequenceId) -> Vec<Action> {
        self.loading = true;
        self.lists_in_flight += 1;
        vec![Action::Store(TaggedCall::new(sequence, StoreCall::List))]
    }

    fn record_failure(&mut self, sequence: SequenceId, err: &StoreError) {
        tracing::warn!(
            %sequence,
            operation = err.operation.as_str(),
            status = ?err.status,
            detail = %err.detail,
            "store call failed"
        );
        self.error = Some(err.to_string());
    }

    fn finish(&mut self, sequence: SequenceId) -> Vec<Action> {
        let Some(entry) = self.sequences.remove(&sequence) else {
            return vec![];
        };
        self.settle_editor(sequence, entry.mutation_failed);

        if entry.mutation.is_some() {
            self.start_queued()
        } else {
            vec![]
        }
    }

    /// Closes the editor waiting on `sequence`. A failed mutation keeps it
    /// open when `close_on_mutation_failure` is off; a failed refresh never
    /// does, since the note was already saved.
    fn settle_editor(&mut self, sequence: SequenceId, mutation_failed: bool) {
        let keep_open = !self.settings.close_on_mutation_failure && mutation_failed;
        let close = match self.mode.editor_mut() {
            Some(editor) if editor.pending == Some(sequence) => {
                editor.pending = None;
                !keep_open
            }
            _ => false,
        };
        if close {
            tracing::debug!(%sequence, "editor closed after submit settled");
            self.mode = InteractionMode::Browsing;
        }
    }

    fn start_queued(&mut self) -> Vec<Action> {
        if self.mutation_running() {
            return vec![];
        }
        let Some(tagged) = self.queued.pop_front() else {
            return vec![];
        };
        tracing::debug!(sequence = %tagged.sequence, "queued mutation ready");
        self.start_mutation(tagged)
    }

    // ---- selection and search ----

    /// Moves the selection down one card, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.filtered_notes.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_notes.len();
    }

    /// Moves the selection up one card, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.filtered_notes.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_notes.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_note(&self) -> Option<&Note> {
        self.filtered_notes.get(self.selected_index)
    }

    /// Replaces the search term and recomputes the view.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.apply_search_filter();
    }

    /// Recomputes `filtered_notes` from the collection and search term.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_notes = self.notes.len(),
            term_len = self.search_term.len()
        )
        .entered();

        self.filtered_notes = filter(&self.notes, &self.search_term)
            .into_iter()
            .cloned()
            .collect();

        if self.filtered_notes.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_notes.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered_notes.len(), "search filter applied");
    }

    // ---- interaction mode ----

    /// Opens an empty editor. Only valid while browsing.
    pub fn open_create(&mut self) -> bool {
        if !self.mode.is_browsing() {
            return false;
        }
        self.mode = InteractionMode::Editing(Editor::create());
        true
    }

    /// Opens the editor on note `id`. Only valid while browsing.
    pub fn open_edit(&mut self, id: &NoteId) -> bool {
        if !self.mode.is_browsing() {
            return false;
        }
        let Some(note) = self.notes.iter().find(|note| &note.id == id) else {
            tracing::debug!(%id, "edit requested for unknown note");
            return false;
        };
        self.mode = InteractionMode::Editing(Editor::edit(note));
        true
    }

    /// Opens the editor on the selected card.
    pub fn open_selected(&mut self) -> bool {
        match self.selected_note().map(|note| note.id.clone()) {
            Some(id) => self.open_edit(&id),
            None => false,
        }
    }

    /// Closes the editor, dropping the draft and clearing the error slot.
    pub fn cancel_editor(&mut self) -> bool {
        if self.mode.editor().is_none() {
            return false;
        }
        self.mode = InteractionMode::Browsing;
        self.error = None;
        true
    }

    /// Submits the open editor.
    ///
    /// Ignored while a previous submit is outstanding. On rejected fields the
    /// editor stays open with the error slot set. Otherwise the editor shows
    /// as saving until its sequence settles.
    pub fn submit_editor(&mut self) -> Vec<Action> {
        let Some(editor) = self.mode.editor() else {
            return vec![];
        };
        if let Some(sequence) = editor.pending {
            tracing::debug!(%sequence, "submit ignored while saving");
            return vec![];
        }

        let draft = editor.draft.clone();
        let target = editor.target.as_ref().map(|note| note.id.clone());
        let started = match target {
            None => self.create_and_refresh(&draft.title, &draft.content),
            Some(id) => self.update_and_refresh(&id, &draft.title, &draft.content),
        };

        match started {
            Ok((sequence, actions)) => {
                if let Some(editor) = self.mode.editor_mut() {
                    editor.pending = Some(sequence);
                }
                actions
            }
            Err(_) => vec![],
        }
    }

    /// Types `c` into the focused draft field.
    pub fn draft_push(&mut self, c: char) -> bool {
        match self.mode.editor_mut() {
            Some(editor) if editor.pending.is_none() => editor.draft.push(editor.focus, c),
            _ => false,
        }
    }

    /// Deletes the last character of the focused draft field.
    pub fn draft_pop(&mut self) -> bool {
        match self.mode.editor_mut() {
            Some(editor) if editor.pending.is_none() => editor.draft.pop(editor.focus),
            _ => false,
        }
    }

    /// Replaces one draft field.
    pub fn set_draft(&mut self, field: DraftField, value: &str) -> bool {
        match self.mode.editor_mut() {
            Some(editor) if editor.pending.is_none() => {
                editor.draft.set(field, value);
                true
            }
            _ => false,
        }
    }

    /// Moves draft focus to the other field.
    pub fn toggle_draft_focus(&mut self) -> bool {
        match self.mode.editor_mut() {
            Some(editor) => {
                editor.focus = editor.focus.toggled();
                true
            }
            None => false,
        }
    }

    /// Asks for confirmation before deleting `id`. Only valid while browsing.
    pub fn request_delete(&mut self, id: &NoteId) -> bool {
        if !self.mode.is_browsing() {
            return false;
        }
        self.mode = InteractionMode::ConfirmingDelete { target: id.clone() };
        true
    }

    /// Asks for confirmation before deleting the selected card.
    pub fn request_delete_selected(&mut self) -> bool {
        match self.selected_note().map(|note| note.id.clone()) {
            Some(id) => self.request_delete(&id),
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) -> bool {
        if !matches!(self.mode, InteractionMode::ConfirmingDelete { .. }) {
            return false;
        }
        self.mode = InteractionMode::Browsing;
        true
    }

    /// Returns to browsing at once and starts the delete sequence.
    pub fn confirm_delete(&mut self) -> Vec<Action> {
        let InteractionMode::ConfirmingDelete { target } = &self.mode else {
            return vec![];
        };
        let target = target.clone();
        self.mode = InteractionMode::Browsing;
        self.delete_and_refresh(&target).1
    }

    // ---- view model ----

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// The card window keeps the selection roughly centred and is shifted
    /// back when it would run past the end of the list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> NotesViewModel {
        NotesViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search_term.clone(),
                is_typing: self.search_focus == SearchFocus::Typing,
            },
            body: self.compute_body(rows),
            overlay: self.compute_overlay(),
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self, rows: usize) -> ListBody {
        if self.loading && self.notes.is_empty() {
            return ListBody::Loading;
        }
        if let Some(kind) = EmptyKind::classify(self.notes.len(), self.filtered_notes.len()) {
            return ListBody::Empty(EmptyState {
                message: kind.message().to_string(),
            });
        }

        let available = (rows.saturating_sub(CHROME_ROWS) / CARD_ROWS).max(1);
        let total = self.filtered_notes.len();

        let mut start = self.selected_index.saturating_sub(available / 2);
        let end = (start + available).min(total);
        if end - start < available && total >= available {
            start = end.saturating_sub(available);
        }

        let cards = self.filtered_notes[start..end]
            .iter()
            .enumerate()
            .map(|(offset, note)| NoteCard::new(note, start + offset == self.selected_index))
            .collect();

        ListBody::Cards {
            cards,
            selected_index: self.selected_index.saturating_sub(start),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let count = if self.search_term.trim().is_empty() {
            self.notes.len().to_string()
        } else {
            format!("{}/{}", self.filtered_notes.len(), self.notes.len())
        };
        let refreshing = if self.loading && !self.notes.is_empty() {
            " refreshing…"
        } else {
            ""
        };
        HeaderInfo {
            title: format!(" Notes ({count}){refreshing} "),
        }
    }

    fn compute_overlay(&self) -> Option<Overlay> {
        match &self.mode {
            InteractionMode::Browsing => None,
            InteractionMode::Editing(editor) => Some(Overlay::Editor(EditorOverlay {
                heading: editor.heading().to_string(),
                submit_label: editor.submit_label().to_string(),
                title: editor.draft.title.clone(),
                content: editor.draft.content.clone(),
                focus: editor.focus,
                error: self.error.clone(),
                saving: editor.pending.is_some(),
            })),
            InteractionMode::ConfirmingDelete { target } => Some(Overlay::ConfirmDelete(ConfirmOverlay {
                prompt: "Delete this note?".to_string(),
                note_title: self
                    .notes
                    .iter()
                    .find(|note| &note.id == target)
                    .map(|note| note.title.clone()),
            })),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.mode, self.search_focus) {
            (InteractionMode::Editing(_), _) => "Tab: switch field  Ctrl+s: save  Esc: cancel",
            (InteractionMode::ConfirmingDelete { .. }, _) => "y/Enter: delete  n/Esc: cancel",
            (InteractionMode::Browsing, SearchFocus::Typing) => "Type to filter  Enter/Esc: done",
            (InteractionMode::Browsing, SearchFocus::Idle) => {
                "j/k: navigate  Enter: edit  n: new  d: delete  /: search  r: reload  q: hide"
            }
        };
        let error = match self.mode {
            InteractionMode::Editing(_) => None,
            _ => self.error.clone(),
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
            error,
        }
    }
}
