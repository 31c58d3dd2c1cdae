//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain and
//! API layers. It owns the patient store and every piece of interaction state.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── API Responses ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Search filtering over the patient store
//! - [`form`]: Entry and edit form state with input masks
//! - [`handler`]: Event processing logic and the create/update/delete flows
//! - [`modes`]: Tab, input mode and modal state machine types
//! - [`notification`]: Banner messages and their dismiss timers
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use patient_registry::app::{handle_event, AppState, Event};
//! use patient_registry::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(actions.is_empty());
//! # Ok::<(), patient_registry::domain::RegistryError>(())
//! ```

pub mod actions;
pub mod filter;
pub mod form;
pub mod handler;
pub mod modes;
pub mod notification;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Focus, InputMode, Modal, ModalKind, SearchFocus, Tab};
pub use notification::{Notification, NotificationKind};
pub use state::AppState;
