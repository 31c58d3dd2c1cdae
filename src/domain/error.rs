//! Error types for the patient registry plugin.
//!
//! This module defines the centralized error type [`RegistryError`], the
//! collapsed network failure type [`ApiError`], and a [`Result`] alias. All
//! errors are implemented using the `thiserror` crate.

use thiserror::Error;

/// A failed call against the registry REST API.
///
/// Transport failures (no response reached the plugin) and API failures
/// (a non-2xx response) share this one type. Both carry a human-readable
/// message that ends up in the notification banner.
/// `status` is `None` for transport failures.
///
/// # Examples
///
/// ```
/// use patient_registry::domain::ApiError;
///
/// let err = ApiError::http(404, "Paciente não encontrado");
/// assert_eq!(err.to_string(), "Paciente não encontrado");
/// assert_eq!(err.status, Some(404));
///
/// let err = ApiError::transport("connection refused");
/// assert!(err.status.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Message shown to the user.
    pub message: String,
    /// HTTP status of the response, if one was received.
    pub status: Option<u16>,
}

impl ApiError {
    /// Creates an error for a response that arrived with a failing status.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Creates an error for a request that never produced a response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

/// The main error type for patient registry operations.
///
/// Covers everything outside the request/response cycle: configuration,
/// theme loading, serialization of outbound payloads, and filesystem access
/// for the trace exporter. API failures convert in via `#[from]`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A registry API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for patient registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
