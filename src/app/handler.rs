//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, API
//! responses and timer ticks, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type, routing input by focus
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `SelectTab`, `NextField`, `PrevField`
//! - **Input**: `Char`, `Backspace`, `Submit`, `Escape`, `Click`
//! - **Commands**: `ViewSelected`, `EditSelected`, `DeleteSelected`,
//!   `OpenAddModal`, `ConfirmDelete`, `CancelDelete`, `Reload`
//! - **System**: `PermissionsResult`, `DismissTimerElapsed`, `ApiResponse`
//!
//! # Request Flows
//!
//! Every API call is a request action now and an `ApiResponse` event later.
//! Each flow catches its own failure at the response and turns it into a
//! banner; an API failure never escapes `handle_event`.

use crate::api::{ApiRequest, RequestTag};
use crate::app::form::PatientForm;
use crate::app::modes::{Focus, InputMode, Modal, ModalKind, SearchFocus, Tab};
use crate::app::notification::NotificationKind;
use crate::app::{Action, AppState};
use crate::domain::{ApiError, Patient, PatientId, Result};
use crate::ui::layout::{hit_test_modal, ModalHit};
use serde_json::Value;

/// Events triggered by user input, timers, or API responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Activates a tab. Selecting the patient list reloads the store.
    SelectTab(Tab),
    /// Reloads the store.
    Reload,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,

    /// Types a character into the focused text input.
    Char(char),
    /// Removes the last character of the focused text input.
    Backspace,
    /// Submits the focused form or confirms the focused prompt.
    Submit,
    NextField,
    PrevField,

    /// Opens the detail panel for the selected patient.
    ViewSelected,
    /// Opens the edit modal for the selected or displayed patient.
    EditSelected,
    /// Asks for confirmation before deleting the selected or displayed patient.
    DeleteSelected,
    /// Opens the entry form as a modal over the list.
    OpenAddModal,
    /// Confirms the pending delete.
    ConfirmDelete,
    /// Cancels the pending delete without any request.
    CancelDelete,

    /// Closes the topmost modal and dismisses the banner.
    Escape,

    /// Left click at a 1-indexed terminal cell.
    Click { row: usize, col: usize },

    /// A banner dismiss timer fired.
    DismissTimerElapsed,

    /// Outcome of the `WebAccess` permission request.
    PermissionsResult { granted: bool },

    /// Response to a request issued through [`Action::SendRequest`].
    ApiResponse {
        tag: RequestTag,
        outcome: std::result::Result<Option<Value>, ApiError>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI needs a re-render, together with the actions to
/// run in order.
///
/// # Parameters
///
/// * `state` - Mutable application state
/// * `event` - Event to process
///
/// # Returns
///
/// A tuple of `(should_render, actions)`:
/// - `should_render`: `true` if state changed and the UI needs updating
/// - `actions`: side effects to execute in order (requests, timers, close)
///
/// # Routing
///
/// Text input and navigation go to whatever [`AppState::focus`] reports: the
/// topmost modal first, then the active tab. Events that make no sense for
/// the focused surface return `(false, vec![])`.
///
/// # Errors
///
/// Returns an error only if an outbound payload cannot be serialized. API
/// failures are reported through the notification banner instead.
///
/// # Example
///
/// ```rust
/// use patient_registry::app::{handle_event, Action, AppState, Event};
/// use patient_registry::ui::theme::Theme;
///
/// let mut state = AppState::new(Theme::default());
/// let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
/// assert!(render);
/// assert!(matches!(actions[0], Action::SendRequest(_)));
/// # Ok::<(), patient_registry::domain::RegistryError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            if !matches!(state.focus(), Focus::List | Focus::Search(_)) {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if !matches!(state.focus(), Focus::List | Focus::Search(_)) {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SelectTab(tab) => Ok((true, select_tab(state, *tab, true))),
        Event::Reload => Ok((true, vec![start_load(state, true)])),
        Event::SearchMode => {
            if state.focus() != Focus::List {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query = String::new();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if state.focus() != Focus::Search(SearchFocus::Navigating) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.focus() != Focus::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            if state.search_query.is_empty() {
                exit_search(state);
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok((edit_text(state, |text| text.push(*c), |form| form.push_char(*c)), vec![])),
        Event::Backspace => Ok((
            edit_text(
                state,
                |text| {
                    text.pop();
                },
                PatientForm::backspace,
            ),
            vec![],
        )),
        Event::NextField | Event::PrevField => {
            let forward = matches!(event, Event::NextField);
            let Some(form) = focused_form(state) else {
                return Ok((false, vec![]));
            };
            if forward {
                form.next_field();
            } else {
                form.prev_field();
            }
            Ok((true, vec![]))
        }
        Event::Submit => match state.focus() {
            Focus::AddForm => submit_create(state),
            Focus::EditForm => submit_update(state),
            Focus::ConfirmDelete(id) => Ok((true, confirm_delete(state, id))),
            Focus::Search(SearchFocus::Typing) => handle_event(state, &Event::FocusResults),
            Focus::List | Focus::Search(SearchFocus::Navigating) => {
                handle_event(state, &Event::ViewSelected)
            }
            Focus::Detail(_) => Ok((false, vec![])),
        },
        Event::ViewSelected => {
            let Some(id) = target_patient(state, false) else {
                return Ok((false, vec![]));
            };
            tracing::debug!(patient_id = id, "viewing patient");
            state.modals.open(Modal::View(id));
            Ok((true, vec![]))
        }
        Event::EditSelected => {
            let Some(id) = target_patient(state, true) else {
                return Ok((false, vec![]));
            };
            tracing::debug!(patient_id = id, "editing patient");
            Ok((state.open_edit(id), vec![]))
        }
        Event::DeleteSelected => {
            let Some(id) = target_patient(state, true) else {
                return Ok((false, vec![]));
            };
            tracing::debug!(patient_id = id, "asking delete confirmation");
            state.modals.open(Modal::ConfirmDelete(id));
            Ok((true, vec![]))
        }
        Event::OpenAddModal => {
            if !matches!(state.focus(), Focus::List | Focus::Search(SearchFocus::Navigating)) {
                return Ok((false, vec![]));
            }
            state.modals.open(Modal::Add);
            Ok((true, vec![]))
        }
        Event::ConfirmDelete => match state.focus() {
            Focus::ConfirmDelete(id) => Ok((true, confirm_delete(state, id))),
            _ => Ok((false, vec![])),
        },
        Event::CancelDelete => {
            let closed = state.modals.close(ModalKind::ConfirmDelete);
            tracing::debug!(closed, "delete cancelled");
            Ok((closed, vec![]))
        }
        Event::Escape => {
            let closed = state.close_top_modal();
            let dismissed = state.notifier.dismiss();
            if !closed && matches!(state.input_mode, InputMode::Search(_)) {
                exit_search(state);
                return Ok((true, vec![]));
            }
            Ok((closed || dismissed, vec![]))
        }
        Event::Click { row, col } => {
            let Some(top) = state.modals.top() else {
                return Ok((false, vec![]));
            };
            let (rows, cols) = state.viewport;
            if rows == 0 || cols == 0 {
                return Ok((false, vec![]));
            }
            match hit_test_modal(top.kind(), rows, cols, *row, *col) {
                ModalHit::CloseControl | ModalHit::Backdrop => {
                    tracing::debug!(modal = ?top, row, col, "modal closed by click");
                    Ok((state.close_top_modal(), vec![]))
                }
                ModalHit::Content => Ok((false, vec![])),
            }
        }
        Event::DismissTimerElapsed => Ok((state.notifier.timer_elapsed(), vec![])),
        Event::PermissionsResult { granted: true } => {
            tracing::debug!("web access granted, loading patients");
            Ok((true, vec![start_load(state, true)]))
        }
        Event::PermissionsResult { granted: false } => {
            tracing::warn!("web access denied");
            let action = notify(
                state,
                NotificationKind::Error,
                "Permissão de acesso à rede negada".to_string(),
            );
            Ok((true, vec![action]))
        }
        Event::ApiResponse { tag, outcome } => Ok((true, handle_response(state, *tag, outcome))),
    }
}

/// Shows a banner and returns the timer action that will dismiss it.
///
/// Every banner gets its own timer; the notifier clears the banner only when
/// the last outstanding timer fires.
fn notify(state: &mut AppState, kind: NotificationKind, message: String) -> Action {
    state.notifier.notify(kind, message);
    Action::ScheduleDismiss {
        seconds: state.notification_seconds,
    }
}

/// Raises the loading indicator and issues `GET /pacientes`.
///
/// `announce` asks for the success banner once the list arrives. Reloads
/// after a create, update or delete are quiet so the mutation's own banner
/// stays up.
fn start_load(state: &mut AppState, announce: bool) -> Action {
    state.loads_in_flight += 1;
    tracing::debug!(announce, in_flight = state.loads_in_flight, "loading patients");
    Action::SendRequest(ApiRequest::list_patients(announce))
}

fn select_tab(state: &mut AppState, tab: Tab, announce: bool) -> Vec<Action> {
    tracing::debug!(tab = ?tab, "selecting tab");
    state.active_tab = tab;
    match tab {
        Tab::Patients => vec![start_load(state, announce)],
        Tab::AddPatient => vec![],
    }
}

fn exit_search(state: &mut AppState) {
    tracing::debug!(query = %state.search_query, "exiting search mode");
    state.input_mode = InputMode::Normal;
    state.search_query = String::new();
    state.apply_search_filter();
}

fn focused_form(state: &mut AppState) -> Option<&mut PatientForm> {
    match state.focus() {
        Focus::AddForm => Some(&mut state.entry_form),
        Focus::EditForm => Some(&mut state.edit_form),
        _ => None,
    }
}

/// Routes a text edit to the search query or the focused form.
fn edit_text(
    state: &mut AppState,
    on_query: impl FnOnce(&mut String),
    on_form: impl FnOnce(&mut PatientForm),
) -> bool {
    let focus = state.focus();
    if !focus.accepts_text() {
        return false;
    }
    if focus == Focus::Search(SearchFocus::Typing) {
        on_query(&mut state.search_query);
        tracing::trace!(query = %state.search_query, "search query updated");
        state.apply_search_filter();
        return true;
    }
    focused_form(state).map(on_form).is_some()
}

/// The patient a row command applies to.
///
/// On the list this is the selected row. With the detail panel on top,
/// `from_detail` lets edit and delete act on the displayed patient.
fn target_patient(state: &AppState, from_detail: bool) -> Option<PatientId> {
    match state.focus() {
        Focus::List | Focus::Search(SearchFocus::Navigating) => {
            state.selected_patient().map(|p| p.id)
        }
        Focus::Detail(id) if from_detail => Some(id),
        _ => None,
    }
}

fn submit_create(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.entry_form.to_draft() {
        Ok(draft) => {
            tracing::debug!(name = %draft.full_name, "creating patient");
            Ok((true, vec![Action::SendRequest(ApiRequest::create_patient(&draft)?)]))
        }
        Err(missing) => Ok((true, vec![notify(state, NotificationKind::Error, missing.to_string())])),
    }
}

fn submit_update(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(id) = state.editing_id else {
        tracing::warn!("edit form submitted without a patient");
        return Ok((false, vec![]));
    };
    match state.edit_form.to_draft() {
        Ok(draft) => {
            tracing::debug!(patient_id = id, "updating patient");
            Ok((true, vec![Action::SendRequest(ApiRequest::update_patient(id, &draft)?)]))
        }
        Err(missing) => Ok((true, vec![notify(state, NotificationKind::Error, missing.to_string())])),
    }
}

fn confirm_delete(state: &mut AppState, id: PatientId) -> Vec<Action> {
    state.modals.close(ModalKind::ConfirmDelete);
    tracing::debug!(patient_id = id, "deleting patient");
    vec![Action::SendRequest(ApiRequest::delete_patient(id))]
}

fn parse_patient_list(body: Option<&Value>) -> std::result::Result<Vec<Patient>, String> {
    match body {
        None | Some(Value::Null) => Ok(vec![]),
        Some(value) => {
            serde_json::from_value::<Vec<Patient>>(value.clone()).map_err(|e| e.to_string())
        }
    }
}

/// Applies an API response to the flow that issued the request.
///
/// # Parameters
///
/// * `state` - Mutable application state
/// * `tag` - Which flow issued the request
/// * `outcome` - Decoded body, or the collapsed transport/API failure
///
/// # Returns
///
/// Follow-up actions: banner timers, and a quiet reload after a mutation.
fn handle_response(
    state: &mut AppState,
    tag: RequestTag,
    outcome: &std::result::Result<Option<Value>, ApiError>,
) -> Vec<Action> {
    let _span = tracing::debug_span!("handle_response", tag = ?tag, ok = outcome.is_ok()).entered();

    match tag {
        RequestTag::ListPatients { announce } => {
            state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
            let parsed = outcome
                .as_ref()
                .map_err(|e| e.message.clone())
                .and_then(|body| parse_patient_list(body.as_ref()));
            match parsed {
                Ok(patients) => {
                    tracing::debug!(count = patients.len(), "patients loaded");
                    state.replace_patients(patients);
                    if announce {
                        vec![notify(
                            state,
                            NotificationKind::Success,
                            "Pacientes carregados com sucesso!".to_string(),
                        )]
                    } else {
                        vec![]
                    }
                }
                Err(message) => {
                    state.replace_patients(vec![]);
                    vec![notify(
                        state,
                        NotificationKind::Error,
                        format!("Erro ao carregar pacientes: {message}"),
                    )]
                }
            }
        }
        RequestTag::CreatePatient => match outcome {
            Ok(_) => {
                tracing::debug!(from_modal = state.modals.is_open(ModalKind::Add), "patient created");
                let mut actions = vec![notify(
                    state,
                    NotificationKind::Success,
                    "Paciente criado com sucesso!".to_string(),
                )];
                state.entry_form.reset();
                state.modals.close(ModalKind::Add);
                actions.extend(select_tab(state, Tab::Patients, false));
                actions
            }
            Err(e) => vec![notify(
                state,
                NotificationKind::Error,
                format!("Erro ao criar paciente: {}", e.message),
            )],
        },
        RequestTag::UpdatePatient { id } => match outcome {
            Ok(_) => {
                let action = notify(
                    state,
                    NotificationKind::Success,
                    "Paciente atualizado com sucesso!".to_string(),
                );
                if state.editing_id == Some(id) {
                    state.close_edit();
                }
                vec![action, start_load(state, false)]
            }
            Err(e) => vec![notify(
                state,
                NotificationKind::Error,
                format!("Erro ao atualizar paciente: {}", e.message),
            )],
        },
        RequestTag::DeletePatient { .. } => match outcome {
            Ok(_) => {
                let action = notify(
                    state,
                    NotificationKind::Success,
                    "Paciente excluído com sucesso!".to_string(),
                );
                vec![action, start_load(state, false)]
            }
            Err(e) => vec![notify(
                state,
                NotificationKind::Error,
                format!("Erro ao excluir paciente: {}", e.message),
            )],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::form::FieldKind;
    use crate::ui::theme::Theme;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(Theme::default());
        state.replace_patients(vec![
            Patient::new(1, "Ana Silva", "12345678901"),
            Patient::new(2, "Bruno Costa", "98765432100"),
        ]);
        state
    }

    fn requests(actions: &[Action]) -> Vec<RequestTag> {
        actions.iter().filter_map(Action::request).map(|r| r.tag).collect()
    }

    #[test]
    fn test_keys_ignored_in_forms() {
        let mut state = loaded_state();
        state.active_tab = Tab::AddPatient;
        let (render, _) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(!render);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_typing_routes_by_focus() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        assert_eq!(state.search_query, "b");
        assert_eq!(state.filtered_patients.len(), 1);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);

        handle_event(&mut state, &Event::SelectTab(Tab::AddPatient)).unwrap();
        handle_event(&mut state, &Event::Char('Z')).unwrap();
        assert_eq!(state.entry_form.value(FieldKind::FullName), "Z");
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn test_typing_ignored_without_text_focus() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::ViewSelected).unwrap();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.search_query.is_empty());
        assert_eq!(state.entry_form.value(FieldKind::FullName), "");
    }

    #[test]
    fn test_selecting_patients_tab_reloads_with_banner() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SelectTab(Tab::AddPatient)).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::SelectTab(Tab::Patients)).unwrap();
        assert!(render);
        assert_eq!(state.active_tab, Tab::Patients);
        assert_eq!(requests(&actions), vec![RequestTag::ListPatients { announce: true }]);
        assert!(state.is_loading());

        let (_, actions) = handle_event(
            &mut state,
            &Event::ApiResponse {
                tag: RequestTag::ListPatients { announce: true },
                outcome: Ok(Some(serde_json::json!([]))),
            },
        )
        .unwrap();
        assert_eq!(actions, vec![Action::ScheduleDismiss { seconds: 5.0 }]);
        let banner = state.notifier.current().unwrap();
        assert_eq!(banner.kind, NotificationKind::Success);
        assert_eq!(banner.message, "Pacientes carregados com sucesso!");
    }

    #[test]
    fn test_escape_dismisses_banner() {
        let mut state = loaded_state();
        state.notifier.notify(NotificationKind::Error, "Erro ao excluir paciente: falhou");

        let (render, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(state.notifier.current().is_none());
        assert!(!state.notifier.timer_elapsed());
    }

    #[test]
    fn test_escape_closes_modal_and_banner_together() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::ViewSelected).unwrap();
        state.notifier.notify(NotificationKind::Success, "Pacientes carregados com sucesso!");

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(state.modals.is_empty());
        assert!(state.notifier.current().is_none());
    }

    #[test]
    fn test_enter_with_empty_query_leaves_search() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_missing_fields_block_create() {
        let mut state = loaded_state();
        state.active_tab = Tab::AddPatient;
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(requests(&actions).is_empty());
        assert_eq!(actions, vec![Action::ScheduleDismiss { seconds: 5.0 }]);
        let banner = state.notifier.current().unwrap();
        assert_eq!(banner.kind, NotificationKind::Error);
    }

    #[test]
    fn test_escape_closes_only_topmost_modal() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::ViewSelected).unwrap();
        handle_event(&mut state, &Event::EditSelected).unwrap();
        assert_eq!(state.focus(), Focus::EditForm);
        assert_eq!(state.editing_id, Some(1));

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.focus(), Focus::Detail(1));
        assert_eq!(state.editing_id, None);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.focus(), Focus::List);
    }

    #[test]
    fn test_backdrop_click_closes_modal() {
        let mut state = loaded_state();
        state.viewport = (30, 100);
        handle_event(&mut state, &Event::OpenAddModal).unwrap();
        assert_eq!(state.focus(), Focus::AddForm);

        let (render, _) = handle_event(&mut state, &Event::Click { row: 15, col: 50 }).unwrap();
        assert!(!render);
        assert!(state.modals.is_open(ModalKind::Add));

        let (render, _) = handle_event(&mut state, &Event::Click { row: 1, col: 1 }).unwrap();
        assert!(render);
        assert!(state.modals.is_empty());
    }

    #[test]
    fn test_update_failure_keeps_modal_open() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::EditSelected).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(requests(&actions), vec![RequestTag::UpdatePatient { id: 1 }]);

        let (_, actions) = handle_event(
            &mut state,
            &Event::ApiResponse {
                tag: RequestTag::UpdatePatient { id: 1 },
                outcome: Err(ApiError::http(400, "CPF inválido")),
            },
        )
        .unwrap();
        assert!(requests(&actions).is_empty());
        assert_eq!(state.editing_id, Some(1));
        assert_eq!(
            state.notifier.current().map(|n| n.message.as_str()),
            Some("Erro ao atualizar paciente: CPF inválido")
        );
    }

    #[test]
    fn test_update_success_closes_and_reloads_quietly() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::EditSelected).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &Event::ApiResponse {
                tag: RequestTag::UpdatePatient { id: 1 },
                outcome: Ok(Some(serde_json::json!({"id_pessoa": 1}))),
            },
        )
        .unwrap();
        assert_eq!(requests(&actions), vec![RequestTag::ListPatients { announce: false }]);
        assert_eq!(state.editing_id, None);
        assert!(state.modals.is_empty());
    }

    #[test]
    fn test_non_array_list_body_is_failure() {
        let mut state = loaded_state();
        state.loads_in_flight = 1;
        handle_event(
            &mut state,
            &Event::ApiResponse {
                tag: RequestTag::ListPatients { announce: true },
                outcome: Ok(Some(serde_json::json!({"unexpected": true}))),
            },
        )
        .unwrap();
        assert!(state.patients.is_empty());
        assert!(!state.is_loading());
        let banner = state.notifier.current().unwrap();
        assert!(banner.message.starts_with("Erro ao carregar pacientes: "));
    }

    #[test]
    fn test_no_content_list_is_empty_store() {
        let mut state = loaded_state();
        handle_event(
            &mut state,
            &Event::ApiResponse {
                tag: RequestTag::ListPatients { announce: false },
                outcome: Ok(None),
            },
        )
        .unwrap();
        assert!(state.patients.is_empty());
        assert!(state.notifier.current().is_none());
    }

    #[test]
    fn test_permission_denied_is_reported() {
        let mut state = AppState::new(Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(requests(&actions).is_empty());
        assert_eq!(state.notifier.current().unwrap().kind, NotificationKind::Error);
    }
}
