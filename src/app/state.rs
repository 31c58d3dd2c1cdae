//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of everything the
//! plugin knows: the patient store, the filtered view of it, tab and modal
//! state, both forms, the notification banner and the loading counter. The
//! plugin shim owns one `AppState` and threads it through every event.
//!
//! # State Components
//!
//! - **Store**: `patients`, replaced wholesale on every list fetch
//! - **Filtered Patients**: the store after applying the search query
//! - **Selection**: cursor position within the filtered patients
//! - **Tabs and Modals**: which surface is visible and receives input
//! - **Forms**: the entry form (Add tab and Add modal) and the edit form
//! - **Notifier**: the banner and its outstanding dismiss timers
//!
//! # Example
//!
//! ```rust
//! use patient_registry::app::AppState;
//! use patient_registry::domain::Patient;
//! use patient_registry::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! state.replace_patients(vec![Patient::new(1, "Ana Silva", "12345678901")]);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(!viewmodel.header.loading);
//! ```

use super::filter::{filter_patients, match_ranges};
use super::form::{FieldKind, PatientForm};
use super::modes::{Focus, InputMode, Modal, ModalKind, ModalStack, SearchFocus, Tab};
use super::notification::Notifier;
use crate::domain::{Patient, PatientId};
use crate::ui::layout::{LIST_CHROME_ROWS, SEARCH_BAR_ROWS};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    build_detail_view, build_list_view, BannerInfo, BodyView, ConfirmView, FooterInfo, FormFieldView,
    FormView, HeaderInfo, ListView, ModalInfo, ModalView, SearchBarInfo, TabInfo, UIViewModel,
};

/// Default banner display time, in seconds.
pub const DEFAULT_NOTIFICATION_SECONDS: f64 = 5.0;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The patient store, in server order.
    pub patients: Vec<Patient>,

    /// Patients matching the current search query.
    ///
    /// Recomputed by `apply_search_filter()`. Used for rendering and
    /// selection bounds checking.
    pub filtered_patients: Vec<Patient>,

    /// Zero-based index of the selected patient within `filtered_patients`.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Current search query string.
    pub search_query: String,

    pub active_tab: Tab,

    /// Open modals, topmost last.
    pub modals: ModalStack,

    /// Patient being edited. `Some` only while the edit modal is open.
    pub editing_id: Option<PatientId>,

    /// Entry form shared by the Add tab and the Add modal.
    pub entry_form: PatientForm,

    /// Edit form, filled from the store when the edit modal opens.
    pub edit_form: PatientForm,

    pub notifier: Notifier,

    /// List fetches issued but not yet answered. The loading indicator is
    /// shown while this is non-zero.
    pub loads_in_flight: usize,

    /// How long a banner stays up.
    pub notification_seconds: f64,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Last rendered `(rows, cols)`, used to hit test mouse clicks.
    pub viewport: (usize, usize),
}

impl AppState {
    /// Creates an empty state on the Patients tab.
    ///
    /// The store starts empty and nothing is loading; the first fetch is
    /// issued by the handler once web access is granted.
    ///
    /// # Parameters
    ///
    /// * `theme` - Color theme for UI rendering
    ///
    /// # Returns
    ///
    /// A new `AppState` in Normal input mode with no modals open.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            patients: vec![],
            filtered_patients: vec![],
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            active_tab: Tab::Patients,
            modals: ModalStack::default(),
            editing_id: None,
            entry_form: PatientForm::default(),
            edit_form: PatientForm::default(),
            notifier: Notifier::default(),
            loads_in_flight: 0,
            notification_seconds: DEFAULT_NOTIFICATION_SECONDS,
            theme,
            viewport: (0, 0),
        }
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        if self.filtered_patients.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_patients.len();
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        if self.filtered_patients.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_patients.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The patient under the selection cursor, if the filtered list has any.
    #[must_use]
    pub fn selected_patient(&self) -> Option<&Patient> {
        self.filtered_patients.get(self.selected_index)
    }

    /// Looks a patient up in the store.
    #[must_use]
    pub fn find_patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Whether any list fetch is still unanswered.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    /// The surface currently receiving keyboard input.
    ///
    /// The topmost modal wins. With no modal open, the active tab decides,
    /// and on the list the input mode splits plain navigation from search.
    #[must_use]
    pub fn focus(&self) -> Focus {
        match self.modals.top() {
            Some(Modal::ConfirmDelete(id)) => Focus::ConfirmDelete(id),
            Some(Modal::Edit) => Focus::EditForm,
            Some(Modal::Add) => Focus::AddForm,
            Some(Modal::View(id)) => Focus::Detail(id),
            None => match (self.active_tab, self.input_mode) {
                (Tab::AddPatient, _) => Focus::AddForm,
                (Tab::Patients, InputMode::Search(focus)) => Focus::Search(focus),
                (Tab::Patients, InputMode::Normal) => Focus::List,
            },
        }
    }

    /// Replaces the store wholesale and re-applies the search filter.
    ///
    /// Detail and delete-confirmation modals for patients that no longer
    /// exist are closed.
    ///
    /// # Parameters
    ///
    /// * `patients` - The complete list from the latest fetch, in server order
    pub fn replace_patients(&mut self, patients: Vec<Patient>) {
        self.patients = patients;
        self.apply_search_filter();

        let stale: Vec<Modal> = self
            .modals
            .iter()
            .copied()
            .filter(|modal| match modal {
                Modal::View(id) | Modal::ConfirmDelete(id) => self.find_patient(*id).is_none(),
                Modal::Add | Modal::Edit => false,
            })
            .collect();
        for modal in stale {
            tracing::debug!(modal = ?modal, "closing modal for vanished patient");
            self.modals.close(modal.kind());
        }
    }

    /// Opens the edit modal for `id`, filling the edit form from the store.
    ///
    /// # Parameters
    ///
    /// * `id` - Patient to edit
    ///
    /// # Returns
    ///
    /// `false` if the patient is not in the store; nothing changes then.
    pub fn open_edit(&mut self, id: PatientId) -> bool {
        let Some(patient) = self.find_patient(id) else {
            return false;
        };
        self.edit_form = PatientForm::from_patient(patient);
        self.editing_id = Some(id);
        self.modals.open(Modal::Edit);
        true
    }

    /// Closes the edit modal and clears the editing id.
    pub fn close_edit(&mut self) {
        self.modals.close(ModalKind::Edit);
        self.editing_id = None;
    }

    /// Closes the topmost modal.
    ///
    /// Closing the edit modal also clears `editing_id`.
    ///
    /// # Returns
    ///
    /// Whether a modal was open.
    pub fn close_top_modal(&mut self) -> bool {
        match self.modals.top() {
            Some(Modal::Edit) => {
                self.close_edit();
                true
            }
            Some(_) => self.modals.pop().is_some(),
            None => false,
        }
    }

    /// Applies the search query to the store.
    ///
    /// Updates `filtered_patients` and clamps `selected_index` to valid bounds.
    /// The store itself is never modified.
    ///
    /// # Behavior
    ///
    /// - **Empty query**: every patient, in store order
    /// - **Non-empty query**: case-insensitive substring match on name, CPF,
    ///   email and phone (see [`filter_patients`])
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_patients = self.patients.len(),
            query_len = self.search_query.len()
        )
        .entered();

        self.filtered_patients = filter_patients(&self.patients, &self.search_query)
            .into_iter()
            .cloned()
            .collect();

        if self.filtered_patients.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_patients.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered_patients.len(), "search filter applied");
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// Transforms application state into display-ready strings: masked CPFs,
    /// search highlights on names, the focused form field, the topmost modal
    /// and footer hints for the focused surface.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in rows
    /// * `_cols` - Terminal width in columns (layout is width independent)
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] ready for rendering.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome
    /// 2. Center window around selected index
    /// 3. Adjust window if near start/end to maximize visible items
    /// 4. Compute relative selection index within visible window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let body = match self.active_tab {
            Tab::Patients => BodyView::List(self.compute_list(rows)),
            Tab::AddPatient => BodyView::Form(Self::compute_form(
                "Cadastrar Novo Paciente",
                "Salvar Paciente",
                &self.entry_form,
                self.modals.is_empty(),
            )),
        };

        UIViewModel {
            header: self.compute_header(),
            tabs: self.compute_tabs(),
            search_bar: self.compute_search_bar(),
            body,
            banner: self.notifier.current().map(|n| BannerInfo {
                kind: n.kind,
                message: n.message.clone(),
            }),
            modal: self.compute_modal(),
            footer: self.compute_footer(),
        }
    }

    /// The visible window of the filtered list, with search highlights.
    fn compute_list(&self, rows: usize) -> ListView {
        if self.filtered_patients.is_empty() {
            return build_list_view(&[], 0);
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_patients.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.filtered_patients.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let window: Vec<&Patient> = self.filtered_patients[visible_start..visible_end].iter().collect();
        let mut view = build_list_view(&window, self.selected_index - visible_start);

        if let ListView::Rows { rows, .. } = &mut view {
            if matches!(self.input_mode, InputMode::Search(_)) {
                for row in rows.iter_mut() {
                    row.highlight_ranges = match_ranges(&row.name, &self.search_query);
                }
            }
        }
        view
    }

    /// Form view for `form`. `focused` is false while a modal covers the form.
    fn compute_form(title: &str, submit_label: &str, form: &PatientForm, focused: bool) -> FormView {
        FormView {
            title: title.to_string(),
            submit_label: submit_label.to_string(),
            fields: FieldKind::ALL
                .into_iter()
                .map(|kind| FormFieldView {
                    label: kind.label().to_string(),
                    value: form.value(kind).to_string(),
                    placeholder: kind.placeholder().to_string(),
                    required: kind.is_required(),
                    is_focused: focused && form.focused() == kind,
                })
                .collect(),
        }
    }

    /// View of the topmost modal.
    ///
    /// Returns `None` for a detail or delete modal whose patient has left the
    /// store; `replace_patients` closes those on the next fetch.
    fn compute_modal(&self) -> Option<ModalInfo> {
        let top = self.modals.top()?;
        let view = match top {
            Modal::Add => ModalView::Form(Self::compute_form(
                "Novo Paciente",
                "Salvar Paciente",
                &self.entry_form,
                true,
            )),
            Modal::Edit => ModalView::Form(Self::compute_form(
                "Editar Paciente",
                "Atualizar Paciente",
                &self.edit_form,
                true,
            )),
            Modal::View(id) => ModalView::Detail(build_detail_view(self.find_patient(id)?)),
            Modal::ConfirmDelete(id) => ModalView::Confirm(ConfirmView {
                title: "Excluir Paciente".to_string(),
                message: format!(
                    "Tem certeza que deseja excluir o paciente \"{}\"?",
                    self.find_patient(id)?.full_name
                ),
            }),
        };
        Some(ModalInfo {
            kind: top.kind(),
            view,
        })
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(" Clínica Médica · Pacientes ({}) ", self.patients.len()),
            loading: self.is_loading(),
        }
    }

    fn compute_tabs(&self) -> Vec<TabInfo> {
        Tab::ALL
            .into_iter()
            .enumerate()
            .map(|(idx, tab)| TabInfo {
                label: tab.label().to_string(),
                key_hint: format!("F{}", idx + 1),
                is_active: tab == self.active_tab,
            })
            .collect()
    }

    /// Footer keybindings for the focused surface.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus() {
            Focus::ConfirmDelete(_) => "y/Enter: excluir  n/ESC: cancelar",
            Focus::EditForm | Focus::AddForm => {
                "Tab/↓: próximo campo  Shift+Tab/↑: anterior  Enter: salvar  ESC: fechar"
            }
            Focus::Detail(_) => "e: editar  d: excluir  ESC: fechar",
            Focus::Search(SearchFocus::Typing) => "ESC: sair da busca  Enter: resultados  Digite para filtrar",
            Focus::Search(SearchFocus::Navigating) => {
                "ESC: sair da busca  /: editar busca  j/k: navegar  v/e/d: ver/editar/excluir"
            }
            Focus::List => {
                "j/k: navegar  /: buscar  v: ver  e: editar  d: excluir  a: novo  r: recarregar  q: sair"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match (self.active_tab, self.input_mode) {
            (Tab::Patients, InputMode::Search(focus)) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            _ => None,
        }
    }

    /// Rows available to the patient list after subtracting UI chrome.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(LIST_CHROME_ROWS),
            InputMode::Search(_) => total_rows.saturating_sub(LIST_CHROME_ROWS + SEARCH_BAR_ROWS),
        }
    }
}
