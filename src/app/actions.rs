//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` and
//! the plugin shim in `main.rs` executes them in order: issuing web requests,
//! arming timers, or hiding the pane.
//!
//! # Example
//!
//! ```rust
//! use patient_registry::api::ApiRequest;
//! use patient_registry::app::Action;
//!
//! let actions = vec![
//!     Action::SendRequest(ApiRequest::list_patients(true)),
//!     Action::ScheduleDismiss { seconds: 5.0 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::ApiRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Sends a request to the registry API.
    ///
    /// The response comes back later as `Event::ApiResponse` carrying the
    /// request's tag.
    SendRequest(ApiRequest),

    /// Arms a one-shot timer that dismisses the notification banner.
    ScheduleDismiss {
        /// Delay before the timer fires.
        seconds: f64,
    },
}

impl Action {
    /// The request carried by this action, if any.
    #[must_use]
    pub const fn request(&self) -> Option<&ApiRequest> {
        match self {
            Self::SendRequest(request) => Some(request),
            _ => None,
        }
    }
}
