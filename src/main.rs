//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the notekeeper library and the Zellij
//! plugin system. It implements `ZellijPlugin`, maps Zellij events to library
//! events and performs the library's actions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; the first refresh runs once granted
//! 3. **Update**: Map keys and web request results to events, run actions
//! 4. **Render**: Call the library render function
//!
//! # Store Calls
//!
//! Every `Action::Store` becomes one `web_request`. The tagged call travels
//! in the request's context map and comes back with `WebRequestResult`, where
//! it is paired with the interpreted response as `Event::StoreCompleted`.
//!
//! # Keybindings
//!
//! Browsing:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`: Edit selected note
//! - `n`: New note
//! - `d`: Delete selected note
//! - `/`: Focus search
//! - `r`: Reload
//! - `q`: Hide plugin
//! - `Esc`: Clear search term
//!
//! Search field:
//! - characters / `Backspace`: Edit term
//! - `Enter`/`Esc`: Leave the field
//!
//! Editor:
//! - characters / `Backspace`: Edit focused field
//! - `Tab`: Switch field
//! - `Enter`: Next field in the title, newline in the content
//! - `Ctrl+s`: Save
//! - `Esc`: Cancel
//!
//! Delete confirmation:
//! - `y`/`Enter`: Delete
//! - `n`/`Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use notekeeper::app::{Event as NoteEvent, InteractionMode, SearchFocus};
use notekeeper::domain::StoreError;
use notekeeper::store::{HttpMethod, TaggedCall};
use notekeeper::{handle_event, Action, Config};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the configuration the shim needs to
/// reach the store.
struct State {
    app: notekeeper::AppState,
    config: Config,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: notekeeper::initialize(&config),
            config,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        notekeeper::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_base = %config.api_base, "parsed configuration");
        self.app = notekeeper::initialize(&config);
        self.config = config;

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("web access granted - starting session");
                NoteEvent::SessionStarted
            }
            Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("web access denied - notes cannot be loaded");
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                self.execute_actions(actions) || should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        notekeeper::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &Event) -> String {
        match event {
            Event::Key(key) => format!("Key({:?})", key.bare_key),
            Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events according to the mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<NoteEvent> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('s') => Some(NoteEvent::Submit),
                BareKey::Char('n') => Some(NoteEvent::KeyDown),
                BareKey::Char('p') => Some(NoteEvent::KeyUp),
                _ => None,
            };
        }

        match &self.app.mode {
            InteractionMode::Editing(_) => match key.bare_key {
                BareKey::Esc => Some(NoteEvent::Cancel),
                BareKey::Tab => Some(NoteEvent::Tab),
                BareKey::Enter => Some(NoteEvent::Enter),
                BareKey::Backspace => Some(NoteEvent::Backspace),
                BareKey::Char(c) => Some(NoteEvent::Char(c)),
                _ => None,
            },
            InteractionMode::ConfirmingDelete { .. } => match key.bare_key {
                BareKey::Char('y') | BareKey::Enter => Some(NoteEvent::ConfirmDelete),
                BareKey::Char('n') | BareKey::Esc => Some(NoteEvent::Cancel),
                _ => None,
            },
            InteractionMode::Browsing if self.app.search_focus == SearchFocus::Typing => {
                match key.bare_key {
                    BareKey::Esc | BareKey::Enter => Some(NoteEvent::ExitSearch),
                    BareKey::Down => Some(NoteEvent::KeyDown),
                    BareKey::Up => Some(NoteEvent::KeyUp),
                    BareKey::Backspace => Some(NoteEvent::Backspace),
                    BareKey::Char(c) => Some(NoteEvent::Char(c)),
                    _ => None,
                }
            }
            InteractionMode::Browsing => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Some(NoteEvent::KeyDown),
                BareKey::Up | BareKey::Char('k') => Some(NoteEvent::KeyUp),
                BareKey::Enter => Some(NoteEvent::EditSelected),
                BareKey::Char('n') => Some(NoteEvent::NewNote),
                BareKey::Char('d') => Some(NoteEvent::DeleteSelected),
                BareKey::Char('/') => Some(NoteEvent::SearchMode),
                BareKey::Char('r') => Some(NoteEvent::Reload),
                BareKey::Char('q') => Some(NoteEvent::CloseFocus),
                BareKey::Esc => Some(NoteEvent::Cancel),
                _ => None,
            },
        }
    }

    /// Pairs a web request result with the call that issued it.
    fn map_web_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<NoteEvent> {
        let tagged = match TaggedCall::from_context(context) {
            Ok(Some(tagged)) => tagged,
            Ok(None) => {
                tracing::debug!("ignoring web request result without a store call");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to decode store call from context");
                return None;
            }
        };

        tracing::debug!(status, sequence = %tagged.sequence, "web request result");
        let outcome = tagged.call.interpret(status, body);
        Some(NoteEvent::StoreCompleted(tagged.reply(outcome)))
    }

    /// Executes actions returned from event handling.
    ///
    /// A store call that cannot even be sent is completed on the spot as a
    /// failed call, so its sequence still settles. Returns whether that
    /// changed visible state.
    fn execute_actions(&mut self, actions: Vec<Action>) -> bool {
        let mut pending: VecDeque<Action> = actions.into();
        let mut render = false;

        while let Some(action) = pending.pop_front() {
            match action {
                Action::CloseFocus => {
                    tracing::debug!("closing plugin focus");
                    hide_self();
                }
                Action::Store(tagged) => {
                    let Err(e) = Self::send_store_call(&self.config, &tagged) else {
                        continue;
                    };
                    tracing::warn!(error = %e, sequence = %tagged.sequence, "store request not sent");
                    let failure = StoreError::transport(tagged.call.operation(), e.to_string());
                    let event = NoteEvent::StoreCompleted(tagged.reply(Err(failure)));
                    match handle_event(&mut self.app, &event) {
                        Ok((changed, follow_up)) => {
                            render |= changed;
                            pending.extend(follow_up);
                        }
                        Err(e) => tracing::warn!(error = %e, "error handling failed store call"),
                    }
                }
            }
        }
        render
    }

    /// Issues one store call as a Zellij web request.
    #[tracing::instrument(level = "debug", skip_all, fields(sequence = %tagged.sequence))]
    fn send_store_call(config: &Config, tagged: &TaggedCall) -> notekeeper::Result<()> {
        let request = tagged.call.to_request(&config.api_base)?;
        let context = tagged.to_context()?;

        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
            HttpMethod::Put => HttpVerb::Put,
            HttpMethod::Delete => HttpVerb::Delete,
        };

        tracing::debug!(
            operation = tagged.call.operation().as_str(),
            url = %request.url,
            "sending store request"
        );
        web_request(request.url, verb, request.headers, request.body, context);
        Ok(())
    }
}
