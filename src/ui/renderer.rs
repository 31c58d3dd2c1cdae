//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! Output goes to stdout as ANSI-styled text; the host clears the pane
//! between frames.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model for the given size and hands it to the
/// components. The modal, if any, is drawn last.
///
/// # Parameters
///
/// * `state` - Application state to render
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Example
///
/// ```rust
/// use patient_registry::app::AppState;
/// use patient_registry::ui::{render, Theme};
///
/// let state = AppState::new(Theme::default());
/// render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_screen(&viewmodel, &state.theme, rows, cols);
}
