//! Tab bar component renderer.
//!
//! This module renders the two top-level tabs: the patient list and the new
//! patient form.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TabInfo;

/// Renders the tab bar at the specified row.
///
/// Each tab shows its key hint and label. The active tab is bold on the
/// accent background; inactive tabs use the dimmed tab color.
///
/// # Parameters
///
/// * `row` - Row position to render the tabs (1-indexed)
/// * `tabs` - Tabs in display order
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns (for padding)
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///   F1 Pacientes    F2 Novo Paciente
/// ```
pub fn render_tabs(row: usize, tabs: &[TabInfo], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(" ");
    let mut used = 1;

    for tab in tabs {
        let text = format!(" {} {} ", tab.key_hint, tab.label);
        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.tab_inactive_fg));
        }
        print!("{text}");
        print!("{} ", Theme::reset());
        used += char_width(&text) + 1;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
