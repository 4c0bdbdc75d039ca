//! Store call protocol between the session reducer and whatever runs the calls.
//!
//! The reducer never talks to the store directly. It emits [`TaggedCall`]s;
//! the runtime (the Zellij shim or the [`Session`](crate::session::Session)
//! driver) performs them and feeds each result back as a [`StoreReply`].
//! Every call is tagged with the [`SequenceId`] of the refresh or
//! mutate-then-refresh sequence that issued it.

use crate::domain::error::{NotekeeperError, Result};
use crate::domain::{Note, NoteId, StoreError, StoreOperation};
use crate::observability::TraceContext;
use crate::store::backend::NotesStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Context-map key under which a [`TaggedCall`] travels with a web request.
pub const CONTEXT_KEY: &str = "notekeeper_call";

/// Identifier of one refresh or mutate-then-refresh sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub u64);

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One remote operation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StoreCall {
    List,
    Create { title: String, content: String },
    Update { id: NoteId, title: String, content: String },
    Delete { id: NoteId },
}

impl StoreCall {
    #[must_use]
    pub const fn operation(&self) -> StoreOperation {
        match self {
            Self::List => StoreOperation::List,
            Self::Create { .. } => StoreOperation::Create,
            Self::Update { .. } => StoreOperation::Update,
            Self::Delete { .. } => StoreOperation::Delete,
        }
    }

    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::List)
    }
}

/// Successful result of a [`StoreCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutput {
    /// Result of `list`.
    Listed(Vec<Note>),
    /// Result of `create`, `update` or `delete`.
    Done,
}

/// Result of a [`StoreCall`].
pub type StoreOutcome = std::result::Result<StoreOutput, StoreError>;

/// A call issued by the reducer, tagged with its sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedCall {
    pub sequence: SequenceId,
    pub call: StoreCall,

    /// Trace context for linking the result's spans to the issuing span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

impl TaggedCall {
    /// Tags `call` with `sequence` and the current trace context.
    #[must_use]
    pub fn new(sequence: SequenceId, call: StoreCall) -> Self {
        Self {
            sequence,
            call,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Pairs this call with its outcome.
    #[must_use]
    pub fn reply(self, outcome: StoreOutcome) -> StoreReply {
        StoreReply {
            sequence: self.sequence,
            call: self.call,
            trace_context: self.trace_context,
            outcome,
        }
    }

    /// Encodes this call into a web-request context map.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::Decode`] if serialization fails.
    pub fn to_context(&self) -> Result<BTreeMap<String, String>> {
        let payload = serde_json::to_string(self)
            .map_err(|e| NotekeeperError::Decode(format!("failed to encode call: {e}")))?;
        Ok(BTreeMap::from([(CONTEXT_KEY.to_string(), payload)]))
    }

    /// Recovers a call from a web-request context map.
    ///
    /// Returns `Ok(None)` if the map was not produced by [`Self::to_context`].
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::Decode`] if the entry is present but malformed.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Option<Self>> {
        context
            .get(CONTEXT_KEY)
            .map(|payload| {
                serde_json::from_str(payload)
                    .map_err(|e| NotekeeperError::Decode(format!("failed to decode call: {e}")))
            })
            .transpose()
    }
}

/// A finished call, fed back into the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReply {
    pub sequence: SequenceId,
    pub call: StoreCall,
    pub trace_context: Option<TraceContext>,
    pub outcome: StoreOutcome,
}

/// Runs `call` against `store`.
pub fn execute<S: NotesStore + ?Sized>(store: &mut S, call: &StoreCall) -> StoreOutcome {
    let _span = tracing::debug_span!("store_execute", operation = call.operation().as_str()).entered();

    let outcome = match call {
        StoreCall::List => store.list().map(StoreOutput::Listed),
        StoreCall::Create { title, content } => store.create(title, content).map(|()| StoreOutput::Done),
        StoreCall::Update { id, title, content } => {
            store.update(id, title, content).map(|()| StoreOutput::Done)
        }
        StoreCall::Delete { id } => store.delete(id).map(|()| StoreOutput::Done),
    };

    match &outcome {
        Ok(_) => tracing::debug!("store call succeeded"),
        Err(e) => tracing::debug!(status = ?e.status, detail = %e.detail, "store call failed"),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_map_round_trips_a_call() {
        let call = TaggedCall {
            sequence: SequenceId(7),
            call: StoreCall::Update {
                id: NoteId::Number(3),
                title: "t".into(),
                content: "c".into(),
            },
            trace_context: None,
        };
        let context = call.to_context().unwrap();
        assert_eq!(TaggedCall::from_context(&context).unwrap(), Some(call));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let context = BTreeMap::from([("other".to_string(), "x".to_string())]);
        assert_eq!(TaggedCall::from_context(&context).unwrap(), None);
    }

    #[test]
    fn malformed_context_is_a_decode_error() {
        let context = BTreeMap::from([(CONTEXT_KEY.to_string(), "{".to_string())]);
        assert!(matches!(
            TaggedCall::from_context(&context),
            Err(NotekeeperError::Decode(_))
        ));
    }

    #[test]
    fn only_list_is_not_a_mutation() {
        assert!(!StoreCall::List.is_mutation());
        assert!(StoreCall::Delete { id: 1.into() }.is_mutation());
        assert_eq!(StoreCall::Delete { id: 1.into() }.operation(), StoreOperation::Delete);
    }
}
