//! Header component renderer.
//!
//! This module renders the title bar. While a patient list fetch is in
//! flight, a loading marker is drawn at its right edge.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Marker drawn at the right edge of the header while loading.
const LOADING_TEXT: &str = " Carregando... ";

/// Renders the header title bar at the specified row.
///
/// Displays the title centered horizontally with bold styling and theme
/// colors, padding the line to the full terminal width.
///
/// # Parameters
///
/// * `row` - Row position to render the header (1-indexed)
/// * `header` - Header information (title, loading flag)
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
/// [left padding] Clínica Médica · Pacientes (12) [right padding][ Carregando... ]
/// ```
///
/// The loading marker takes its width out of the right padding, so the
/// title does not move when it appears.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = char_width(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;
    let loading_len = if header.loading { char_width(LOADING_TEXT) } else { 0 };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(padding + title_len + loading_len))
    );

    if header.loading {
        print!("{}", Theme::fg(&theme.colors.loading_fg));
        print!("{LOADING_TEXT}");
    }

    print!("{}", Theme::reset());
    row + 1
}
