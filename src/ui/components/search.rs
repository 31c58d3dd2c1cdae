//! Search bar component renderer.
//!
//! This module renders the patient search box shown above the table while
//! search mode is active.

use crate::ui::helpers::{char_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// Displays a 3-line bordered box containing the query. While keystrokes go
/// to the query the text is drawn normally with a cursor mark; once focus
/// moves to the results it is dimmed.
///
/// # Parameters
///
/// * `row` - Starting row position for the search box (1-indexed)
/// * `search` - Search bar information (query text, typing focus)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Buscar: silva▏   │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// The box width is `cols - (2 * SEARCH_BOX_MARGIN)`; the inner content
/// width is `box_width - 2`. Long queries are truncated to the inner width.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_typing { "▏" } else { "" };
    let search_text = truncate(&format!(" Buscar: {}{cursor}", search.query), inner_width);
    let padding = inner_width.saturating_sub(char_width(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    if search.is_typing {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
