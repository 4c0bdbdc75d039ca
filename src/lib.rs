//! Notekeeper: a Zellij plugin for keeping short notes in a remote store.
//!
//! Notekeeper keeps a session-local view of a remote collection of notes:
//! - Lists, creates, edits and deletes notes over a small REST API
//! - Re-fetches the whole collection after every change
//! - Filters notes by a case-insensitive search term
//! - Runs one editor or delete confirmation modal at a time
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Reducer
//! │  - Event handling and mode transitions              │
//! │  - Store sequences (mutate, then refresh)           │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store Layer   │   │ Session       │
//! │ (ui/)         │   │ (store/)      │   │ (session.rs)  │
//! │ - Rendering   │   │ - REST codec  │   │ - Blocking    │
//! │ - Components  │   │ - Call tags   │   │   driver      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) · Observability · Infrastructure  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Data Flow
//!
//! 1. Zellij key events are mapped to [`Event`]s
//! 2. [`handle_event`] mutates [`AppState`] and returns [`Action`]s
//! 3. `Action::Store` calls become web requests tagged with their sequence
//! 4. Web request results come back as `Event::StoreCompleted`
//! 5. [`ui::render`] draws the current view model
//!
//! # Example
//!
//! ```rust
//! use notekeeper::app::{handle_event, Event};
//! use notekeeper::{initialize, Config};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::SessionStarted)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), notekeeper::NotekeeperError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod session;
pub mod store;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InteractionMode, SearchFocus, SessionSettings};
pub use domain::{Note, NoteId, NotekeeperError, Result};

use std::collections::BTreeMap;

/// Default base path of the notes REST API.
pub const DEFAULT_API_BASE: &str = "/api";

/// Plugin configuration, read from the Zellij plugin configuration block.
///
/// ```text
/// plugin location="file:notekeeper.wasm" {
///     api_base "http://localhost:8080/api"
///     close_on_mutation_failure "true"
///     serialize_mutations "false"
///     trace_level "info"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the notes API, without trailing slash. Default: `/api`
    pub api_base: String,

    /// Close the editor once its save settles even if the save failed.
    /// Default: `true`
    pub close_on_mutation_failure: bool,

    /// Run at most one create/update/delete sequence at a time.
    /// Default: `false`
    pub serialize_mutations: bool,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            close_on_mutation_failure: true,
            serialize_mutations: false,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or unparsable values fall back to their defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base`: trimmed, trailing `/` removed; blank falls back to `/api`
    /// - `close_on_mutation_failure`, `serialize_mutations`: `true`/`false`
    /// - `trace_level`: any non-blank string
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use notekeeper::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base".to_string(), "http://localhost:8080/api/".to_string());
    /// map.insert("serialize_mutations".to_string(), "true".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_base, "http://localhost:8080/api");
    /// assert!(config.serialize_mutations);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let api_base = config
            .get("api_base")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base);

        let flag = |key: &str, default: bool| {
            config
                .get(key)
                .and_then(|s| s.trim().parse::<bool>().ok())
                .unwrap_or(default)
        };

        Self {
            api_base,
            close_on_mutation_failure: flag("close_on_mutation_failure", defaults.close_on_mutation_failure),
            serialize_mutations: flag("serialize_mutations", defaults.serialize_mutations),
            trace_level: config
                .get("trace_level")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.trace_level),
        }
    }

    /// Reducer switches derived from this configuration.
    #[must_use]
    pub const fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            close_on_mutation_failure: self.close_on_mutation_failure,
            serialize_mutations: self.serialize_mutations,
        }
    }
}

/// Creates the session state for a freshly loaded plugin.
///
/// The state starts browsing and loading; the first refresh is issued by
/// `Event::SessionStarted` once web access is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_base = %config.api_base, "initializing notekeeper plugin");
    AppState::new(config.session_settings())
}
