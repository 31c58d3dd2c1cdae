//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled output through composable
//! rendering components, with theme support and search match highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types and the pure list/detail builders
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`layout`]: Screen geometry shared with mouse hit testing
//! - [`helpers`]: Shared rendering utilities (highlighting, padding)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    build_detail_view, build_list_view, BodyView, EmptyState, FooterInfo, HeaderInfo, ListView,
    ModalInfo, ModalView, PatientRow, SearchBarInfo, UIViewModel,
};
