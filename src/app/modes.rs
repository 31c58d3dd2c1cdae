//! Input, tab, and modal state types for the application.
//!
//! These enums form the interaction state machine. Together they decide which
//! keybindings are live and where typed characters go.
//!
//! # State Machine
//!
//! - [`Tab`]: exactly one of the patient list or the entry form is active.
//! - [`InputMode`]: on the list, either plain navigation or search.
//! - [`ModalStack`]: overlays opened on top of the active tab. Only the
//!   topmost modal receives input.
//! - [`Focus`]: the single surface currently receiving input, derived from
//!   the three above.
//!
//! # Example
//!
//! ```rust
//! use patient_registry::app::modes::{Modal, ModalStack};
//!
//! let mut modals = ModalStack::default();
//! modals.open(Modal::View(3));
//! modals.open(Modal::ConfirmDelete(3));
//! assert_eq!(modals.pop(), Some(Modal::ConfirmDelete(3)));
//! assert_eq!(modals.top(), Some(Modal::View(3)));
//! ```

use crate::domain::PatientId;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters are appended to the query.
    Typing,

    /// The filtered list is being navigated; row actions are available.
    Navigating,
}

/// Current input handling mode on the patient list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search with a [`SearchFocus`].
    Search(SearchFocus),
}

/// Top-level tabs. Selecting one deactivates the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// The patient list. Selecting it always reloads the store.
    Patients,
    /// The entry form for a new patient.
    AddPatient,
}

impl Tab {
    /// Label shown in the tab bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Patients => "Pacientes",
            Self::AddPatient => "Novo Paciente",
        }
    }

    pub const ALL: [Self; 2] = [Self::Patients, Self::AddPatient];
}

/// An overlay opened on top of the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Entry form in a modal, sharing the Add tab's form.
    Add,
    /// Edit form for the patient in `AppState::editing_id`.
    Edit,
    /// Read-only detail panel.
    View(PatientId),
    /// Delete confirmation naming the patient.
    ConfirmDelete(PatientId),
}

/// Modal kind without its payload, for matching close requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Add,
    Edit,
    View,
    ConfirmDelete,
}

impl Modal {
    #[must_use]
    pub const fn kind(self) -> ModalKind {
        match self {
            Self::Add => ModalKind::Add,
            Self::Edit => ModalKind::Edit,
            Self::View(_) => ModalKind::View,
            Self::ConfirmDelete(_) => ModalKind::ConfirmDelete,
        }
    }
}

/// Open modals, bottom first.
///
/// Opening a modal of a kind that is already open moves it to the top with
/// its new payload rather than stacking a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalStack(Vec<Modal>);

impl ModalStack {
    pub fn open(&mut self, modal: Modal) {
        self.close(modal.kind());
        self.0.push(modal);
    }

    /// Closes every modal of `kind`. Returns whether anything was closed.
    pub fn close(&mut self, kind: ModalKind) -> bool {
        let before = self.0.len();
        self.0.retain(|m| m.kind() != kind);
        self.0.len() != before
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.0.pop()
    }

    #[must_use]
    pub fn top(&self) -> Option<Modal> {
        self.0.last().copied()
    }

    #[must_use]
    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.0.iter().any(|m| m.kind() == kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.0.iter()
    }
}

/// The surface receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ConfirmDelete(PatientId),
    EditForm,
    AddForm,
    Detail(PatientId),
    Search(SearchFocus),
    List,
}

impl Focus {
    /// Whether typed characters are text input rather than commands.
    #[must_use]
    pub const fn accepts_text(self) -> bool {
        matches!(
            self,
            Self::EditForm | Self::AddForm | Self::Search(SearchFocus::Typing)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reopening_moves_to_top() {
        let mut modals = ModalStack::default();
        modals.open(Modal::View(1));
        modals.open(Modal::Edit);
        modals.open(Modal::View(2));
        assert_eq!(modals.iter().count(), 2);
        assert_eq!(modals.top(), Some(Modal::View(2)));
    }

    #[test]
    fn test_close_by_kind() {
        let mut modals = ModalStack::default();
        modals.open(Modal::Add);
        modals.open(Modal::ConfirmDelete(4));
        assert!(modals.close(ModalKind::Add));
        assert!(!modals.close(ModalKind::Add));
        assert!(!modals.is_open(ModalKind::Add));
        assert!(modals.is_open(ModalKind::ConfirmDelete));
    }

    #[test]
    fn test_text_focus() {
        assert!(Focus::AddForm.accepts_text());
        assert!(Focus::Search(SearchFocus::Typing).accepts_text());
        assert!(!Focus::Search(SearchFocus::Navigating).accepts_text());
        assert!(!Focus::ConfirmDelete(1).accepts_text());
    }
}
