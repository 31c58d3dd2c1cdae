//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with the loading indicator
//! - [`tabs`]: Tab bar (patient list, new patient)
//! - [`banner`]: Success and error notifications
//! - [`search`]: Search input box
//! - [`table`]: Patient list (NOME, CPF, TELEFONE, AÇÕES)
//! - [`empty`]: Empty state message for no patients
//! - [`form`]: Patient form fields
//! - [`modal`]: Modal overlay (forms, details, delete confirmation)
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Tabs]
//! [Border]
//! [Banner]
//! [Search Bar - 3 lines, search mode only]
//! [Table Headers + Rows | Empty State | Form]
//! [Border]
//! [Footer]
//! [Modal overlay, if any]
//! ```

mod banner;
mod empty;
mod footer;
mod form;
mod header;
mod modal;
mod search;
mod table;
mod tabs;

use crate::ui::helpers::position_cursor;
use crate::ui::layout::HEADER_ROW;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, ListView, UIViewModel};

use banner::render_banner;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form_body;
use header::render_header;
use modal::render_modal;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};
use tabs::render_tabs;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate the tabs from the body and the body from the footer.
///
/// # Parameters
///
/// * `row` - Row position to render the border (1-indexed)
/// * `color` - Hex color for the border
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen for a view model.
///
/// Draws the chrome and the active tab's body top-down, pins the footer to
/// the last two rows, and draws the modal last so it sits on top.
///
/// # Parameters
///
/// * `vm` - View model to render
/// * `theme` - Active color theme
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = HEADER_ROW;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_tabs(current_row, &vm.tabs, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_banner(current_row, vm.banner.as_ref(), theme, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    match &vm.body {
        BodyView::List(ListView::Rows { rows: items, .. }) => {
            current_row = render_table_headers(current_row, theme, cols);
            render_table_rows(current_row, items, theme, cols);
        }
        BodyView::List(ListView::Empty(empty)) => {
            render_empty_state(current_row, empty, theme, cols);
        }
        BodyView::Form(form) => {
            render_form_body(current_row, form, theme, cols);
        }
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, rows, cols);
    }
}
