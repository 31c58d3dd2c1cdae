//! Empty state component renderer.
//!
//! This module renders the placeholder shown instead of the table when the
//! store is empty or the search matches nothing.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message starting at the specified row.
///
/// Displays the message and a dimmed subtitle, both centered, leaving one
/// blank line above them.
///
/// # Parameters
///
/// * `row` - Starting row position (1-indexed)
/// * `empty` - Message and subtitle to show
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 3)
///
/// # Layout
///
/// ```text
///
///                 Nenhum paciente encontrado
///           Adicione um novo paciente para começar
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let msg_len = char_width(&empty.message);
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", empty.message);
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let sub_len = char_width(&empty.subtitle);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(row + 2, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{}", empty.subtitle);
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());

    row + 3
}
