//! Patient Registry: a Zellij plugin for a medical clinic's patient records.
//!
//! The plugin lists, searches, creates, edits, views and deletes patients by
//! talking to the clinic's REST backend through Zellij's `web_request`:
//! - Patient table with live search and match highlighting
//! - Add form as a tab or a modal, edit form as a modal
//! - Detail view and delete confirmation modals
//! - CPF, phone and date input masks
//! - Success and error banners with auto-dismiss

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and request flows                 │
//! │  - Forms, search filter, notifications              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                      │
//! ┌───────────────────────┐        ┌───────────────────────┐
//! │ UI Layer (ui/)        │        │ API Layer (api/)      │
//! │ - Rendering           │        │ - Request building    │
//! │ - Theming, layout     │        │ - Response decoding   │
//! └───────────────────────┘        └───────────────────────┘
//!         │                                      │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Format & Infrastructure                    │
//! │  - Patient model and errors (domain/)               │
//! │  - Masks and date conversion (format/)              │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls Zellij directly. Requests leave the state machine
//! as [`Action::SendRequest`]; the shim sends them and feeds the responses
//! back as [`Event::ApiResponse`].
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/patient-registry.wasm" {
//!         api_base_url "http://localhost:3000/api"
//!         theme "catppuccin-mocha"
//!         notification_seconds "5"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use patient_registry::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config::default();
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! let Some(request) = actions.iter().find_map(Action::request) else {
//!     unreachable!("granting permissions loads the list");
//! };
//! let prepared = config.client.prepare_request(request)?;
//! assert_eq!(prepared.url, "http://localhost:3000/api/pacientes");
//! # Ok::<(), patient_registry::RegistryError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod format;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use api::ApiClient;
pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, Tab};
pub use domain::{ApiError, Patient, RegistryError, Result};
pub use ui::Theme;

use app::state::DEFAULT_NOTIFICATION_SECONDS;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/patient-registry.wasm" {
///     api_base_url "https://clinica.example.com/api"
///     theme "catppuccin-latte"
///     theme_file "~/.config/zellij/clinic-theme.toml"
///     notification_seconds "8"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Client for the REST backend, built from `api_base_url`.
    pub client: ApiClient,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` maps to the sandbox home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,

    /// Seconds a banner stays visible. Default: 5
    pub notification_seconds: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ApiClient::default(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            notification_seconds: DEFAULT_NOTIFICATION_SECONDS,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Invalid values are logged and replaced by their defaults.
    ///
    /// # Parameters
    ///
    /// * `config` - Key/value map from the plugin's KDL block
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use patient_registry::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base_url".to_string(), "https://clinica.example.com/api/".to_string());
    /// map.insert("notification_seconds".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.client.base_url(), "https://clinica.example.com/api");
    /// assert_eq!(config.notification_seconds, 5.0);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let client = config
            .get("api_base_url")
            .map(|raw| {
                parse_base_url(raw).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "invalid api_base_url, using default");
                    ApiClient::default()
                })
            })
            .unwrap_or_default();

        let notification_seconds = config
            .get("notification_seconds")
            .map_or(DEFAULT_NOTIFICATION_SECONDS, |raw| {
                parse_notification_seconds(raw).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "invalid notification_seconds, using default");
                    DEFAULT_NOTIFICATION_SECONDS
                })
            });

        Self {
            client,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            notification_seconds,
        }
    }

    /// Resolves the configured theme: file first, then name, then default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn parse_base_url(raw: &str) -> Result<ApiClient> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(ApiClient::new(trimmed))
    } else {
        Err(RegistryError::Config(format!(
            "api_base_url must start with http:// or https://, got {trimmed:?}"
        )))
    }
}

fn parse_notification_seconds(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds > 0.0 => Ok(seconds),
        _ => Err(RegistryError::Config(format!(
            "notification_seconds must be a positive number, got {raw:?}"
        ))),
    }
}

/// Builds the initial application state from configuration.
///
/// The patient store starts empty; the first load is issued once the
/// `WebAccess` permission is granted.
///
/// # Parameters
///
/// * `config` - Parsed plugin configuration
///
/// # Returns
///
/// An `AppState` with the resolved theme and banner duration applied.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_base_url = %config.client.base_url(), "initializing patient registry plugin");

    let mut state = AppState::new(config.theme());
    state.notification_seconds = config.notification_seconds;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.client.base_url(), api::API_BASE_URL);
        assert!((config.notification_seconds - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.theme().name, "catppuccin-mocha");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", "localhost:3000"),
            ("notification_seconds", "-2"),
            ("theme", "neon"),
        ]));
        assert_eq!(config.client.base_url(), api::API_BASE_URL);
        assert!((config.notification_seconds - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.theme().name, "catppuccin-mocha");
    }

    #[test]
    fn test_parse_errors_are_config_errors() {
        assert!(matches!(parse_base_url("ftp://x"), Err(RegistryError::Config(_))));
        assert!(matches!(
            parse_notification_seconds("NaN"),
            Err(RegistryError::Config(_))
        ));
        assert!((parse_notification_seconds(" 2.5 ").unwrap() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_initialize_applies_config() {
        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("notification_seconds", "8"),
        ]));
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert!((state.notification_seconds - 8.0).abs() < f64::EPSILON);
        assert!(state.patients.is_empty());
    }
}
