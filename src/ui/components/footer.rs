//! Footer component renderer.
//!
//! This module renders the help bar at the bottom of the screen. The hints
//! change with focus: list, search, forms, detail panel and delete prompt
//! each get their own line.

use crate::ui::helpers::{char_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at the specified row.
///
/// Displays keybinding hints centered horizontally with dimmed styling. Pads
/// the line to fill the entire terminal width.
///
/// # Parameters
///
/// * `row` - Row position to render the footer (1-indexed)
/// * `footer` - Footer information (keybinding text for the current focus)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
/// [left padding] j/k: navegar  /: buscar  v: ver  e: editar ... [right padding]
/// ```
///
/// Padding is split evenly on both sides. Hints wider than the pane are cut
/// with `...`, counting characters rather than bytes.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);

    let text_len = char_width(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
