//! Domain layer for the patient registry plugin.
//!
//! Core types independent of Zellij APIs: the patient record mirrored from
//! the REST backend and the error types shared by every layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`patient`]: Patient record and outbound draft
//!
//! # Examples
//!
//! ```
//! use patient_registry::domain::{Patient, Result};
//!
//! fn first_patient() -> Result<Patient> {
//!     Ok(Patient::new(1, "Ana Silva", "12345678901"))
//! }
//! ```

pub mod error;
pub mod patient;

pub use error::{ApiError, RegistryError, Result};
pub use patient::{Patient, PatientDraft, PatientId};
