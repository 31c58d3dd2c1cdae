//! Patient domain model.
//!
//! This module defines [`Patient`], the record mirrored from the registry
//! API, and [`PatientDraft`], the body sent when creating or updating one.
//! Field names on the wire follow the backend's Portuguese schema; Rust names
//! are English.

use serde::{Deserialize, Serialize};

/// Server-assigned patient identifier (`id_pessoa`).
pub type PatientId = i64;

/// A patient record as returned by `GET /pacientes`.
///
/// Only `id`, `full_name` and `tax_id` are required. `insurance_plan_name` is
/// denormalized by the server on read and never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "id_pessoa")]
    pub id: PatientId,
    #[serde(rename = "nome")]
    pub full_name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "data_nascimento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "id_convenio", default, skip_serializing_if = "Option::is_none")]
    pub insurance_plan_id: Option<i64>,
    #[serde(rename = "convenio_nome", default, skip_serializing_if = "Option::is_none")]
    pub insurance_plan_name: Option<String>,
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Patient {
    /// Creates a patient with only the required fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use patient_registry::domain::Patient;
    ///
    /// let patient = Patient::new(7, "Ana Silva", "12345678901");
    /// assert_eq!(patient.id, 7);
    /// assert!(patient.email.is_none());
    /// ```
    #[must_use]
    pub fn new(id: PatientId, full_name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            tax_id: tax_id.into(),
            phone: None,
            email: None,
            birth_date: None,
            insurance_plan_id: None,
            insurance_plan_name: None,
            address: None,
        }
    }

    /// Text shown for the patient's insurance plan: the plan name, else its id.
    #[must_use]
    pub fn insurance_plan_label(&self) -> Option<String> {
        self.insurance_plan_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| self.insurance_plan_id.map(|id| id.to_string()))
    }
}

/// Outbound body for `POST /pacientes` and `PUT /pacientes/{id}`.
///
/// Empty optional fields are left out of the JSON entirely. `insurance_plan_id`
/// is doubly optional: `None` omits the key, `Some(None)` means the user typed
/// something that is not a number and is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientDraft {
    #[serde(rename = "nome")]
    pub full_name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "data_nascimento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "id_convenio", skip_serializing_if = "Option::is_none")]
    pub insurance_plan_id: Option<Option<i64>>,
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
