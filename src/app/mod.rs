//! Application layer coordinating state, events, and actions.
//!
//! Sits between the runtime (the Zellij shim in `main.rs`, or the
//! [`Session`](crate::session::Session) driver) and the domain/store layers.
//!
//! ```text
//! Input → Events → handle_event → AppState mutations → Actions → Store calls
//!                      ↑                                             ↓
//!                      └────────────── StoreCompleted ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Search filter and empty-result classification
//! - [`handler`]: Event processing and routing by mode
//! - [`modes`]: Interaction mode state machine types
//! - [`state`]: Session state, store sequences and view model computation

pub mod actions;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use filter::{filter, EmptyKind};
pub use handler::{handle_event, Event};
pub use modes::{Editor, InteractionMode, SearchFocus};
pub use state::{AppState, SessionSettings};
