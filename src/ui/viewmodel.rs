//! View model types representing renderable UI state.
//!
//! View models are display-ready snapshots computed from application state.
//! They contain no business logic: every string is already formatted, masked
//! and translated, and every row knows whether it is selected.
//!
//! [`build_list_view`] and [`build_detail_view`] are the pure renderers for
//! the patient list and the detail panel. `AppState::compute_viewmodel`
//! assembles the full [`UIViewModel`] around them.
//!
//! # Example
//!
//! ```rust
//! use patient_registry::domain::Patient;
//! use patient_registry::ui::viewmodel::{build_list_view, ListView};
//!
//! let patients = vec![Patient::new(1, "Ana Silva", "12345678901")];
//! let refs: Vec<&Patient> = patients.iter().collect();
//! match build_list_view(&refs, 0) {
//!     ListView::Rows { rows, .. } => assert_eq!(rows[0].tax_id, "123.456.789-01"),
//!     ListView::Empty(_) => unreachable!(),
//! }
//! ```

use crate::app::modes::ModalKind;
use crate::app::notification::NotificationKind;
use crate::domain::{Patient, PatientId};
use crate::format::{format_date_for_display, mask_cpf};

/// Placeholder for a missing detail value.
pub const NOT_INFORMED: &str = "Não informado";

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub tabs: Vec<TabInfo>,
    /// Present while search mode is active on the list.
    pub search_bar: Option<SearchBarInfo>,
    pub body: BodyView,
    pub banner: Option<BannerInfo>,
    /// Topmost modal, drawn over everything else.
    pub modal: Option<ModalInfo>,
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Whether a list fetch is in flight.
    pub loading: bool,
}

/// One entry in the tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    /// Key that selects this tab.
    pub key_hint: String,
    pub is_active: bool,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keystrokes currently go to the query.
    pub is_typing: bool,
}

/// Content of the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    List(ListView),
    Form(FormView),
}

/// The patient list, or its empty-state placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Rows {
        rows: Vec<PatientRow>,
        /// Index of the selected row within `rows`.
        selected_index: usize,
    },
    Empty(EmptyState),
}

/// What a row control does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    View,
    Edit,
    Delete,
}

impl RowActionKind {
    pub const ALL: [Self; 3] = [Self::View, Self::Edit, Self::Delete];

    /// Tooltip-style label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "Visualizar",
            Self::Edit => "Editar",
            Self::Delete => "Excluir",
        }
    }

    /// Key that triggers the action on the selected row.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::View => 'v',
            Self::Edit => 'e',
            Self::Delete => 'd',
        }
    }
}

/// A row control addressed by patient id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAction {
    pub kind: RowActionKind,
    pub patient_id: PatientId,
}

/// Display information for a single patient in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub id: PatientId,
    pub name: String,
    /// Masked CPF.
    pub tax_id: String,
    pub phone: String,
    pub actions: [RowAction; 3],
    pub is_selected: bool,

    /// Character ranges of `name` matching the search query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            message: "Nenhum paciente encontrado".to_string(),
            subtitle: "Adicione um novo paciente para começar".to_string(),
        }
    }
}

/// A patient form, in a tab or a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FormFieldView>,
    pub submit_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub required: bool,
    pub is_focused: bool,
}

/// Read-only patient detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    /// `(label, value)` pairs in display order.
    pub fields: Vec<(String, String)>,
}

/// Delete confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmView {
    pub title: String,
    pub message: String,
}

/// Body of the topmost modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    Form(FormView),
    Detail(DetailView),
    Confirm(ConfirmView),
}

/// The topmost modal and the kind that fixes its geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInfo {
    pub kind: ModalKind,
    pub view: ModalView,
}

/// Notification banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInfo {
    pub kind: NotificationKind,
    pub message: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Builds the list view for `patients`.
///
/// Produces one row per patient, each carrying view, edit and delete actions
/// keyed by the patient's id. An empty slice yields [`ListView::Empty`] with
/// no rows. `selected` is clamped to the last row.
///
/// # Parameters
///
/// * `patients` - Patients to show, already filtered and windowed
/// * `selected` - Index of the selected patient within `patients`
///
/// # Returns
///
/// [`ListView::Rows`] with masked CPFs, or [`ListView::Empty`].
#[must_use]
pub fn build_list_view(patients: &[&Patient], selected: usize) -> ListView {
    if patients.is_empty() {
        return ListView::Empty(EmptyState::default());
    }

    let selected_index = selected.min(patients.len() - 1);
    let rows = patients
        .iter()
        .enumerate()
        .map(|(idx, patient)| PatientRow {
            id: patient.id,
            name: patient.full_name.clone(),
            tax_id: mask_cpf(&patient.tax_id),
            phone: patient.phone.clone().unwrap_or_default(),
            actions: RowActionKind::ALL.map(|kind| RowAction {
                kind,
                patient_id: patient.id,
            }),
            is_selected: idx == selected_index,
            highlight_ranges: Vec::new(),
        })
        .collect();

    ListView::Rows {
        rows,
        selected_index,
    }
}

fn or_not_informed(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map_or_else(|| NOT_INFORMED.to_string(), ToString::to_string)
}

/// Builds the detail panel for one patient.
///
/// Missing values read `Não informado`. The birth date is shown day first and
/// the plan by name, falling back to its id.
///
/// # Parameters
///
/// * `patient` - Patient to describe
///
/// # Returns
///
/// A [`DetailView`] with seven `(label, value)` pairs in display order.
#[must_use]
pub fn build_detail_view(patient: &Patient) -> DetailView {
    let birth_date = patient
        .birth_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(format_date_for_display);

    let fields = [
        ("Nome Completo", or_not_informed(Some(patient.full_name.as_str()))),
        ("CPF", or_not_informed(Some(mask_cpf(&patient.tax_id).as_str()))),
        ("Telefone", or_not_informed(patient.phone.as_deref())),
        ("Email", or_not_informed(patient.email.as_deref())),
        ("Data de Nascimento", or_not_informed(birth_date.as_deref())),
        ("Convênio", or_not_informed(patient.insurance_plan_label().as_deref())),
        ("Endereço", or_not_informed(patient.address.as_deref())),
    ];

    DetailView {
        title: "Detalhes do Paciente".to_string(),
        fields: fields
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patients() -> Vec<Patient> {
        vec![
            Patient::new(10, "Ana Silva", "12345678901"),
            Patient::new(20, "Bruno Costa", "98765432100"),
            Patient::new(30, "Carla Dias", "55544433322"),
        ]
    }

    #[test]
    fn test_one_row_per_patient_with_addressable_actions() {
        let store = patients();
        let refs: Vec<&Patient> = store.iter().collect();
        let ListView::Rows { rows, selected_index } = build_list_view(&refs, 1) else {
            panic!("expected rows");
        };

        assert_eq!(rows.len(), 3);
        assert_eq!(selected_index, 1);
        for (row, patient) in rows.iter().zip(&store) {
            assert_eq!(row.id, patient.id);
            let kinds: Vec<_> = row.actions.iter().map(|a| a.kind).collect();
            assert_eq!(kinds, RowActionKind::ALL.to_vec());
            assert!(row.actions.iter().all(|a| a.patient_id == patient.id));
        }
        assert!(rows[1].is_selected);
        assert!(!rows[0].is_selected);
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let view = build_list_view(&[], 0);
        let ListView::Empty(empty) = view else {
            panic!("expected empty state");
        };
        assert_eq!(empty.message, "Nenhum paciente encontrado");
        assert_eq!(empty.subtitle, "Adicione um novo paciente para começar");
    }

    #[test]
    fn test_selection_is_clamped() {
        let store = patients();
        let refs: Vec<&Patient> = store.iter().collect();
        let ListView::Rows { selected_index, .. } = build_list_view(&refs, 99) else {
            panic!("expected rows");
        };
        assert_eq!(selected_index, 2);
    }

    #[test]
    fn test_detail_view_fills_missing_values() {
        let mut patient = Patient::new(1, "Ana Silva", "12345678901");
        patient.birth_date = Some("1990-03-15".into());
        patient.insurance_plan_id = Some(4);

        let detail = build_detail_view(&patient);
        let value = |label: &str| {
            detail
                .fields
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(value("CPF"), "123.456.789-01");
        assert_eq!(value("Telefone"), NOT_INFORMED);
        assert_eq!(value("Data de Nascimento"), "15/03/1990");
        assert_eq!(value("Convênio"), "4");
        assert_eq!(value("Endereço"), NOT_INFORMED);
    }
}
