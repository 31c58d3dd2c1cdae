//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the patient registry library and the
//! Zellij plugin system. It translates Zellij events into library events,
//! runs the returned actions against the Zellij API, and renders.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, Mouse, `WebRequestResult`, Timer, `PermissionRequestResult`
//! 3. **Permission**: Once `WebAccess` is granted, the first list load is sent
//! 4. **Update**: Handle events, delegate to the library, execute actions
//! 5. **Render**: Record the viewport for mouse hit testing, then draw
//!
//! # Request Round Trip
//!
//! ```text
//! Action::SendRequest ─► web_request(url, verb, headers, body, context)
//!                                                          │
//! Event::ApiResponse ◄── decode_context + interpret ◄── WebRequestResult
//! ```
//!
//! # Keybindings
//!
//! Global:
//! - `F1`: Patient list (reloads)
//! - `F2`: New patient form
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Patient list:
//! - `j`/`k`/`Down`/`Up`: Move selection
//! - `v`/`Enter`: View, `e`: Edit, `d`: Delete, `a`: Add (modal)
//! - `/`: Search, `r`: Reload, `1`/`2`: Tabs, `q`: Close plugin
//!
//! Forms:
//! - Typing edits the focused field (masks applied)
//! - `Tab`/`Down`: Next field, `Shift+Tab`/`Up`: Previous field
//! - `Enter`: Submit, `Esc`: Close
//!
//! Delete confirmation:
//! - `y`/`Enter`: Delete, `n`/`Esc`: Cancel
//!
//! Mouse: clicking `[x]` or outside a modal closes it.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use patient_registry::api::{decode_context, HttpMethod, RawResponse, TraceContext};
use patient_registry::app::Focus;
use patient_registry::{handle_event, Action, ApiClient, Config, Event, SearchFocus, Tab};
use tracing_opentelemetry::OpenTelemetrySpanExt;

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: patient_registry::AppState,

    /// Resolves request paths against the configured backend.
    client: ApiClient,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: patient_registry::initialize(&default_config),
            client: default_config.client,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests `WebAccess` and subscribes to events.
    ///
    /// Nothing is fetched until the permission result arrives.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        patient_registry::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_base_url = %config.client.base_url(), "parsed configuration");
        self.app = patient_registry::initialize(&config);
        self.client = config.client;

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the Zellij event, runs the handler and its actions.
    ///
    /// Returns `true` if the plugin UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(our_event) => self.dispatch(&our_event),
                None => false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(our_event) => self.dispatch(&our_event),
                None => false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => self.dispatch(&Event::DismissTimerElapsed),
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = matches!(status, PermissionStatus::Granted);
                self.dispatch(&Event::PermissionsResult { granted })
            }
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                self.handle_web_response(status, &headers, body, &context)
            }
            _ => false,
        }
    }

    /// Records the viewport for click hit testing and draws the UI.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.viewport = (rows, cols);
        patient_registry::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` through the library and executes the returned actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Routes a web response back to the flow that issued the request.
    ///
    /// The response span joins the trace of the originating request.
    fn handle_web_response(
        &mut self,
        status: u16,
        headers: &BTreeMap<String, String>,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> bool {
        let Some((tag, trace)) = decode_context(context) else {
            tracing::warn!(status, "web response without a request tag, ignoring");
            return false;
        };

        let span = tracing::debug_span!("api_response", tag = ?tag, status);
        if let Some(parent) = trace.as_ref().and_then(TraceContext::remote_context) {
            span.set_parent(parent);
        }
        let _guard = span.entered();

        let outcome = ApiClient::interpret(RawResponse::from_web_result(status, headers, body));
        if let Err(e) = &outcome {
            tracing::error!(error = %e, "request failed");
        }

        self.dispatch(&Event::ApiResponse { tag, outcome })
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Converts Zellij's 0-based click position to 1-based screen cells.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let row = usize::try_from(line).ok()? + 1;
                Some(Event::Click { row, col: col + 1 })
            }
            _ => None,
        }
    }

    /// Maps keyboard events to application events based on what has focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match key.bare_key {
            BareKey::F(1) => return Some(Event::SelectTab(Tab::Patients)),
            BareKey::F(2) => return Some(Event::SelectTab(Tab::AddPatient)),
            _ => {}
        }

        match self.app.focus() {
            Focus::ConfirmDelete(_) => Self::map_confirm_key(key),
            Focus::AddForm | Focus::EditForm => Self::map_form_key(key),
            Focus::Detail(_) => Self::map_detail_key(key),
            Focus::Search(SearchFocus::Typing) => Self::map_search_typing_key(key),
            Focus::Search(SearchFocus::Navigating) => Self::map_list_key(key, true),
            Focus::List => Self::map_list_key(key, false),
        }
    }

    fn map_confirm_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char('y' | 'Y') | BareKey::Enter => Event::ConfirmDelete,
            BareKey::Char('n' | 'N') | BareKey::Esc => Event::CancelDelete,
            _ => return None,
        })
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PrevField,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_detail_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char('e') => Event::EditSelected,
            BareKey::Char('d') => Event::DeleteSelected,
            BareKey::Esc | BareKey::Char('q') => Event::Escape,
            _ => return None,
        })
    }

    fn map_search_typing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter | BareKey::Down => Event::FocusResults,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_list_key(key: &KeyWithModifier, searching: bool) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') if searching => Event::FocusSearchBar,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('v') | BareKey::Enter => Event::ViewSelected,
            BareKey::Char('e') => Event::EditSelected,
            BareKey::Char('d') => Event::DeleteSelected,
            BareKey::Char('a') => Event::OpenAddModal,
            BareKey::Char('r') => Event::Reload,
            BareKey::Char('1') if !searching => Event::SelectTab(Tab::Patients),
            BareKey::Char('2') if !searching => Event::SelectTab(Tab::AddPatient),
            BareKey::Char('q') if !searching => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::SendRequest(request) => match self.client.prepare_request(request) {
                Ok(prepared) => {
                    tracing::debug!(
                        method = prepared.method.as_str(),
                        url = %prepared.url,
                        "sending request"
                    );
                    web_request(
                        prepared.url,
                        Self::http_verb(prepared.method),
                        prepared.headers,
                        prepared.body,
                        prepared.context,
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, tag = ?request.tag, "failed to prepare request");
                }
            },
            Action::ScheduleDismiss { seconds } => {
                set_timeout(*seconds);
            }
        }
    }

    const fn http_verb(method: HttpMethod) -> HttpVerb {
        match method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
            HttpMethod::Put => HttpVerb::Put,
            HttpMethod::Delete => HttpVerb::Delete,
        }
    }
}
