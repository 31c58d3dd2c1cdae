//! Patient entry and edit forms.
//!
//! A [`PatientForm`] holds the raw text of each field plus the focused field.
//! CPF and phone masks are re-applied to the whole value after every edit, so
//! the field always shows the punctuated form. [`PatientForm::to_draft`]
//! turns the text into the outbound [`PatientDraft`].

use crate::domain::{Patient, PatientDraft};
use crate::format::{
    digits_only, format_date_for_db, format_date_for_display, mask_cpf, mask_phone, parse_plan_id,
};
use thiserror::Error;

/// Fields of the patient form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    FullName,
    Cpf,
    Phone,
    Email,
    BirthDate,
    InsurancePlanId,
    Address,
}

impl FieldKind {
    pub const ALL: [Self; 7] = [
        Self::FullName,
        Self::Cpf,
        Self::Phone,
        Self::Email,
        Self::BirthDate,
        Self::InsurancePlanId,
        Self::Address,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Nome",
            Self::Cpf => "CPF",
            Self::Phone => "Telefone",
            Self::Email => "Email",
            Self::BirthDate => "Data de Nascimento",
            Self::InsurancePlanId => "ID do Convênio",
            Self::Address => "Endereço",
        }
    }

    /// Hint shown while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Cpf => "000.000.000-00",
            Self::Phone => "(00) 00000-0000",
            Self::BirthDate => "DD/MM/AAAA",
            _ => "",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::FullName | Self::Cpf)
    }

    const fn index(self) -> usize {
        self as usize
    }

    fn apply_mask(self, value: &str) -> String {
        match self {
            Self::Cpf => mask_cpf(value),
            Self::Phone => mask_phone(value),
            _ => value.to_string(),
        }
    }
}

fn join_labels(fields: &[FieldKind]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Submission blocked because required fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Preencha os campos obrigatórios: {}", join_labels(.0))]
pub struct MissingFields(pub Vec<FieldKind>);

/// Text state of a patient form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    values: [String; 7],
    focused: usize,
}

impl PatientForm {
    /// Builds an edit form pre-filled from a stored patient.
    ///
    /// Stored values are copied as they are; masks only apply once the user
    /// edits a field. The birth date is shown as `DD/MM/YYYY`. A save without
    /// changes sends back the stored values.
    ///
    /// # Parameters
    ///
    /// * `patient` - The record being edited
    ///
    /// # Returns
    ///
    /// A form focused on the first field.
    #[must_use]
    pub fn from_patient(patient: &Patient) -> Self {
        let mut form = Self::default();
        form.set_raw(FieldKind::FullName, &patient.full_name);
        form.set_raw(FieldKind::Cpf, &patient.tax_id);
        form.set_raw(FieldKind::Phone, patient.phone.as_deref().unwrap_or_default());
        form.set_raw(FieldKind::Email, patient.email.as_deref().unwrap_or_default());
        if let Some(date) = patient.birth_date.as_deref() {
            form.set_raw(FieldKind::BirthDate, &format_date_for_display(date));
        }
        if let Some(plan) = patient.insurance_plan_id {
            form.set_raw(FieldKind::InsurancePlanId, &plan.to_string());
        }
        form.set_raw(FieldKind::Address, patient.address.as_deref().unwrap_or_default());
        form
    }

    fn set_raw(&mut self, kind: FieldKind, value: &str) {
        self.values[kind.index()] = value.to_string();
    }

    /// Current text of a field, as displayed.
    #[must_use]
    pub fn value(&self, kind: FieldKind) -> &str {
        &self.values[kind.index()]
    }

    /// Replaces a field's value, applying the field's mask.
    pub fn set(&mut self, kind: FieldKind, value: &str) {
        self.values[kind.index()] = kind.apply_mask(value);
    }

    /// The field receiving typed characters.
    #[must_use]
    pub fn focused(&self) -> FieldKind {
        FieldKind::ALL[self.focused]
    }

    pub fn focus(&mut self, kind: FieldKind) {
        self.focused = kind.index();
    }

    /// Moves focus to the next field, wrapping to the first.
    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % FieldKind::ALL.len();
    }

    /// Moves focus to the previous field, wrapping to the last.
    pub fn prev_field(&mut self) {
        self.focused = self
            .focused
            .checked_sub(1)
            .unwrap_or(FieldKind::ALL.len() - 1);
    }

    /// Appends a character to the focused field.
    ///
    /// The field's mask is re-applied to the whole value, so a pre-filled
    /// CPF or phone gets masked on the first keystroke.
    pub fn push_char(&mut self, c: char) {
        let kind = self.focused();
        let mut value = self.value(kind).to_string();
        value.push(c);
        self.set(kind, &value);
    }

    /// Removes the last character of the focused field.
    pub fn backspace(&mut self) {
        let kind = self.focused();
        let mut value = self.value(kind).to_string();
        value.pop();
        self.set(kind, &value);
    }

    /// Clears every field and focuses the first one.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Converts the form into a request body.
    ///
    /// Empty optional fields are omitted, the CPF is reduced to digits, the
    /// birth date is normalized to ISO, and the plan id is parsed as a leading
    /// integer (non-numeric text becomes `null`).
    ///
    /// # Errors
    ///
    /// Returns [`MissingFields`] when a required field is blank.
    pub fn to_draft(&self) -> Result<PatientDraft, MissingFields> {
        let missing: Vec<FieldKind> = FieldKind::ALL
            .into_iter()
            .filter(|kind| kind.is_required() && self.value(*kind).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(MissingFields(missing));
        }

        let optional = |kind: FieldKind| {
            let value = self.value(kind);
            (!value.is_empty()).then(|| value.to_string())
        };

        Ok(PatientDraft {
            full_name: self.value(FieldKind::FullName).to_string(),
            tax_id: digits_only(self.value(FieldKind::Cpf)),
            phone: optional(FieldKind::Phone),
            email: optional(FieldKind::Email),
            birth_date: format_date_for_db(Some(self.value(FieldKind::BirthDate))),
            insurance_plan_id: optional(FieldKind::InsurancePlanId).map(|v| parse_plan_id(&v)),
            address: optional(FieldKind::Address),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut PatientForm, kind: FieldKind, text: &str) {
        form.focus(kind);
        text.chars().for_each(|c| form.push_char(c));
    }

    #[test]
    fn test_cpf_masked_while_typing() {
        let mut form = PatientForm::default();
        type_into(&mut form, FieldKind::Cpf, "12345678901");
        assert_eq!(form.value(FieldKind::Cpf), "123.456.789-01");

        form.backspace();
        assert_eq!(form.value(FieldKind::Cpf), "123.456.789-0");
    }

    #[test]
    fn test_phone_masked_while_typing() {
        let mut form = PatientForm::default();
        type_into(&mut form, FieldKind::Phone, "11987654321");
        assert_eq!(form.value(FieldKind::Phone), "(11) 98765-4321");
    }

    #[test]
    fn test_missing_required_fields() {
        let mut form = PatientForm::default();
        type_into(&mut form, FieldKind::Email, "a@b.c");
        let err = form.to_draft().unwrap_err();
        assert_eq!(err.0, vec![FieldKind::FullName, FieldKind::Cpf]);
        assert_eq!(err.to_string(), "Preencha os campos obrigatórios: Nome, CPF");
    }

    #[test]
    fn test_draft_conversion() {
        let mut form = PatientForm::default();
        type_into(&mut form, FieldKind::FullName, "Ana Silva");
        type_into(&mut form, FieldKind::Cpf, "12345678901");
        type_into(&mut form, FieldKind::BirthDate, "15/03/1990");
        type_into(&mut form, FieldKind::InsurancePlanId, "7");

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.tax_id, "12345678901");
        assert_eq!(draft.birth_date.as_deref(), Some("1990-03-15"));
        assert_eq!(draft.insurance_plan_id, Some(Some(7)));
        assert!(draft.phone.is_none());
        assert!(draft.address.is_none());
    }

    #[test]
    fn test_non_numeric_plan_becomes_null() {
        let mut form = PatientForm::default();
        type_into(&mut form, FieldKind::FullName, "Ana");
        type_into(&mut form, FieldKind::Cpf, "1");
        type_into(&mut form, FieldKind::InsurancePlanId, "abc");
        assert_eq!(form.to_draft().unwrap().insurance_plan_id, Some(None));
    }

    #[test]
    fn test_from_patient_round_trips() {
        let mut patient = Patient::new(1, "Ana", "12345678901");
        patient.birth_date = Some("1990-03-15".into());
        patient.insurance_plan_id = Some(3);

        let form = PatientForm::from_patient(&patient);
        assert_eq!(form.value(FieldKind::Cpf), "12345678901");
        assert_eq!(form.value(FieldKind::BirthDate), "15/03/1990");

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.tax_id, "12345678901");
        assert_eq!(draft.birth_date.as_deref(), Some("1990-03-15"));
        assert_eq!(draft.insurance_plan_id, Some(Some(3)));
    }

    #[test]
    fn test_unchanged_edit_keeps_stored_phone() {
        let mut patient = Patient::new(1, "Ana", "12345678901");
        patient.phone = Some("+55 (11) 98765-4321".into());

        let form = PatientForm::from_patient(&patient);
        assert_eq!(form.value(FieldKind::Phone), "+55 (11) 98765-4321");

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.phone, patient.phone);
        assert_eq!(draft.tax_id, patient.tax_id);
    }

    #[test]
    fn test_typing_into_prefilled_field_masks_it() {
        let patient = Patient::new(1, "Ana", "1234567890");
        let mut form = PatientForm::from_patient(&patient);
        assert_eq!(form.value(FieldKind::Cpf), "1234567890");
        type_into(&mut form, FieldKind::Cpf, "1");
        assert_eq!(form.value(FieldKind::Cpf), "123.456.789-01");
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = PatientForm::default();
        form.prev_field();
        assert_eq!(form.focused(), FieldKind::Address);
        form.next_field();
        assert_eq!(form.focused(), FieldKind::FullName);
    }
}
