//! Notes store client layer.
//!
//! Everything needed to reach the remote collection of notes and to turn its
//! answers into a single success/failure shape.
//!
//! # Modules
//!
//! - `backend`: [`NotesStore`] trait, the four-operation contract
//! - `call`: tagged call/reply protocol used by the session reducer
//! - `http`: REST request building and response interpretation
//! - `memory`: in-process store with failure injection

pub mod backend;
pub mod call;
pub mod http;
pub mod memory;

pub use backend::NotesStore;
pub use call::{execute, SequenceId, StoreCall, StoreOutcome, StoreOutput, StoreReply, TaggedCall};
pub use http::{HttpMethod, HttpRequest};
pub use memory::MemoryStore;
