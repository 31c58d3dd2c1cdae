//! End-to-end flows through `handle_event`, with the host simulated.
//!
//! Requests leave as actions, go through the real client preparation and
//! come back as `WebRequestResult`-shaped payloads decoded the same way the
//! plugin shim decodes them.

use std::collections::BTreeMap;

use patient_registry::api::{decode_context, ApiRequest, RawResponse, RequestTag};
use patient_registry::app::filter::filter_patients;
use patient_registry::app::form::FieldKind;
use patient_registry::app::notification::NotificationKind;
use patient_registry::format::{format_date_for_db, mask_cpf, mask_phone};
use patient_registry::ui::viewmodel::{build_list_view, ListView, RowActionKind};
use patient_registry::{handle_event, Action, ApiClient, AppState, Event, Patient, Tab, Theme};

fn requests(actions: &[Action]) -> Vec<&ApiRequest> {
    actions.iter().filter_map(Action::request).collect()
}

/// Plays the host's part: prepares the request, "sends" it, and feeds the
/// canned answer back as an `ApiResponse` event.
fn respond(
    state: &mut AppState,
    request: &ApiRequest,
    status: u16,
    headers: &[(&str, &str)],
    body: &str,
) -> Vec<Action> {
    let prepared = ApiClient::default().prepare_request(request).unwrap();
    let (tag, _trace) = decode_context(&prepared.context).unwrap();
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    let raw = RawResponse::from_web_result(status, &headers, body.as_bytes().to_vec());
    let outcome = ApiClient::interpret(raw);
    let (_, actions) = handle_event(state, &Event::ApiResponse { tag, outcome }).unwrap();
    actions
}

const JSON: &[(&str, &str)] = &[("content-type", "application/json")];

const TWO_PATIENTS: &str = r#"[
    {"id_pessoa": 1, "nome": "Ana Silva", "cpf": "12345678901", "telefone": "(11) 98765-4321"},
    {"id_pessoa": 2, "nome": "Bruno Costa", "cpf": "98765432100", "email": "bruno@example.com"}
]"#;

fn loaded_state() -> AppState {
    let mut state = AppState::new(Theme::default());
    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    let load = requests(&actions)[0].clone();
    respond(&mut state, &load, 200, JSON, TWO_PATIENTS);
    state
}

fn sample_patients() -> Vec<Patient> {
    vec![
        Patient::new(1, "Ana Silva", "12345678901"),
        Patient::new(2, "Bruno Costa", "98765432100"),
        Patient::new(3, "Mariana Alves", "11122233344"),
    ]
}

#[test]
fn list_view_has_one_addressable_row_per_patient() {
    let patients = sample_patients();
    let refs: Vec<&Patient> = patients.iter().collect();

    let ListView::Rows { rows, .. } = build_list_view(&refs, 0) else {
        panic!("expected rows");
    };
    assert_eq!(rows.len(), patients.len());
    for (row, patient) in rows.iter().zip(&patients) {
        for kind in RowActionKind::ALL {
            assert!(row
                .actions
                .iter()
                .any(|a| a.kind == kind && a.patient_id == patient.id));
        }
    }
}

#[test]
fn empty_list_view_is_placeholder_only() {
    assert!(matches!(build_list_view(&[], 0), ListView::Empty(_)));
}

#[test]
fn empty_query_keeps_everything_in_order() {
    let patients = sample_patients();
    let filtered = filter_patients(&patients, "");
    let ids: Vec<_> = filtered.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn filtering_ignores_case() {
    let patients = sample_patients();
    let names: Vec<_> = filter_patients(&patients, "ANA")
        .iter()
        .map(|p| p.full_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana Silva", "Mariana Alves"]);
}

#[test]
fn date_normalization() {
    assert_eq!(format_date_for_db(Some("15/03/1990")).as_deref(), Some("1990-03-15"));
    assert_eq!(format_date_for_db(Some("1990-03-15")).as_deref(), Some("1990-03-15"));
    assert_eq!(format_date_for_db(None), None);
}

#[test]
fn input_masks() {
    assert_eq!(mask_cpf("12345678901"), "123.456.789-01");
    assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
}

#[test]
fn initial_load_fills_store_and_announces() {
    let state = loaded_state();
    assert_eq!(state.patients.len(), 2);
    assert!(!state.is_loading());
    let banner = state.notifier.current().unwrap();
    assert_eq!(banner.kind, NotificationKind::Success);
    assert_eq!(banner.message, "Pacientes carregados com sucesso!");
}

#[test]
fn load_failure_empties_store_and_clears_loading() {
    let mut state = loaded_state();
    let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
    assert!(state.is_loading());

    let load = requests(&actions)[0].clone();
    let follow_up = respond(&mut state, &load, 500, JSON, r#"{"error": "banco indisponível"}"#);

    assert!(state.patients.is_empty());
    assert!(state.filtered_patients.is_empty());
    assert!(!state.is_loading());
    let banner = state.notifier.current().unwrap();
    assert_eq!(banner.kind, NotificationKind::Error);
    assert_eq!(banner.message, "Erro ao carregar pacientes: banco indisponível");
    assert!(matches!(follow_up[..], [Action::ScheduleDismiss { .. }]));
}

#[test]
fn transport_failure_is_reported_like_an_api_failure() {
    let mut state = loaded_state();
    let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
    let load = requests(&actions)[0].clone();

    respond(&mut state, &load, 400, &[], "connection refused");

    assert!(state.patients.is_empty());
    assert!(!state.is_loading());
    assert_eq!(
        state.notifier.current().unwrap().message,
        "Erro ao carregar pacientes: connection refused"
    );
}

#[test]
fn successful_create_reloads_once_and_returns_to_list() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::SelectTab(Tab::AddPatient)).unwrap();
    assert_eq!(state.active_tab, Tab::AddPatient);

    state.entry_form.set(FieldKind::FullName, "Carla Dias");
    state.entry_form.set(FieldKind::Cpf, "55544433322");
    state.entry_form.set(FieldKind::BirthDate, "02/11/1985");

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let sent = requests(&actions);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tag, RequestTag::CreatePatient);
    let body: serde_json::Value =
        serde_json::from_str(sent[0].options.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["cpf"], "55544433322");
    assert_eq!(body["data_nascimento"], "1985-11-02");

    let create = sent[0].clone();
    let after = respond(
        &mut state,
        &create,
        201,
        JSON,
        r#"{"id_pessoa": 3, "nome": "Carla Dias", "cpf": "55544433322"}"#,
    );

    let reloads: Vec<_> = requests(&after)
        .into_iter()
        .filter(|r| matches!(r.tag, RequestTag::ListPatients { .. }))
        .collect();
    assert_eq!(reloads.len(), 1);
    assert_eq!(state.active_tab, Tab::Patients);
    assert!(state.entry_form.value(FieldKind::FullName).is_empty());
    assert_eq!(
        state.notifier.current().unwrap().message,
        "Paciente criado com sucesso!"
    );
}

#[test]
fn create_with_missing_fields_sends_nothing() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::SelectTab(Tab::AddPatient)).unwrap();
    state.entry_form.set(FieldKind::FullName, "Carla Dias");

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    assert!(requests(&actions).is_empty());
    assert_eq!(
        state.notifier.current().unwrap().kind,
        NotificationKind::Error
    );
}

#[test]
fn delete_without_confirmation_sends_nothing() {
    let mut state = loaded_state();

    let (_, actions) = handle_event(&mut state, &Event::DeleteSelected).unwrap();
    assert!(requests(&actions).is_empty());

    let (_, actions) = handle_event(&mut state, &Event::CancelDelete).unwrap();
    assert!(requests(&actions).is_empty());

    handle_event(&mut state, &Event::DeleteSelected).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Escape).unwrap();
    assert!(requests(&actions).is_empty());
    assert!(state.modals.is_empty());
    assert_eq!(state.patients.len(), 2);
}

#[test]
fn confirmed_delete_reloads_quietly() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::KeyDown).unwrap();
    handle_event(&mut state, &Event::DeleteSelected).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
    let sent = requests(&actions);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tag, RequestTag::DeletePatient { id: 2 });
    assert_eq!(sent[0].path, "/pacientes/2");

    let delete = sent[0].clone();
    let after = respond(&mut state, &delete, 204, &[], "");
    let tags: Vec<_> = requests(&after).iter().map(|r| r.tag).collect();
    assert_eq!(tags, vec![RequestTag::ListPatients { announce: false }]);
    assert_eq!(
        state.notifier.current().unwrap().message,
        "Paciente excluído com sucesso!"
    );
}

#[test]
fn edit_round_trip_closes_modal_and_reloads() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::EditSelected).unwrap();
    assert_eq!(state.editing_id, Some(1));
    assert_eq!(state.edit_form.value(FieldKind::Cpf), "12345678901");

    state.edit_form.set(FieldKind::Phone, "11912345678");
    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let update = requests(&actions)[0].clone();
    assert_eq!(update.tag, RequestTag::UpdatePatient { id: 1 });

    let after = respond(&mut state, &update, 200, JSON, r#"{"id_pessoa": 1}"#);
    assert_eq!(state.editing_id, None);
    assert!(state.modals.is_empty());
    assert_eq!(requests(&after).len(), 1);
}

#[test]
fn unchanged_edit_sends_stored_values_back() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::EditSelected).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let body: serde_json::Value =
        serde_json::from_str(requests(&actions)[0].options.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "nome": "Ana Silva",
            "cpf": "12345678901",
            "telefone": "(11) 98765-4321"
        })
    );
}

#[test]
fn failed_update_keeps_edit_open() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::EditSelected).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    let update = requests(&actions)[0].clone();

    let after = respond(&mut state, &update, 409, JSON, r#"{"error": "CPF já cadastrado"}"#);
    assert!(requests(&after).is_empty());
    assert_eq!(state.editing_id, Some(1));
    assert_eq!(
        state.notifier.current().unwrap().message,
        "Erro ao atualizar paciente: CPF já cadastrado"
    );
}

#[test]
fn newer_banner_outlives_older_timer() {
    let mut state = loaded_state();
    let delete = ApiRequest::delete_patient(1);
    respond(&mut state, &delete, 500, JSON, r#"{"error": "falhou"}"#);
    assert_eq!(
        state.notifier.current().unwrap().message,
        "Erro ao excluir paciente: falhou"
    );

    // The load banner's timer fires first and must not clear the error.
    handle_event(&mut state, &Event::DismissTimerElapsed).unwrap();
    assert!(state.notifier.current().is_some());
    handle_event(&mut state, &Event::DismissTimerElapsed).unwrap();
    assert!(state.notifier.current().is_none());
}

#[test]
fn backdrop_click_closes_modal() {
    let mut state = loaded_state();
    state.viewport = (30, 100);
    handle_event(&mut state, &Event::ViewSelected).unwrap();
    assert!(!state.modals.is_empty());

    let (render, _) = handle_event(&mut state, &Event::Click { row: 1, col: 1 }).unwrap();
    assert!(render);
    assert!(state.modals.is_empty());
}
