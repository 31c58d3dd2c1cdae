//! Patient table with NOME, CPF, TELEFONE and AÇÕES columns.
//!
//! Supports selection highlighting and search match highlighting on the
//! name column. Widths are counted in characters since names carry accents.

use crate::ui::helpers::{self, char_width, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PatientRow;

/// Width of the NOME column, including the selection marker.
const NAME_WIDTH: usize = 36;
/// Width of the CPF column; fits `000.000.000-00` plus spacing.
const TAX_ID_WIDTH: usize = 16;
/// Width of the TELEFONE column; fits `(00) 00000-0000` plus spacing.
const PHONE_WIDTH: usize = 17;

/// Renders the table column headers at the specified row.
///
/// Displays the four column headings with bold styling, aligned to the
/// fixed column widths used by the rows.
///
/// # Parameters
///
/// * `row` - Row position to render the headers (1-indexed)
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
///  NOME                               CPF             TELEFONE         AÇÕES
/// ```
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let heading = format!(
        " {}{}{}{}",
        pad("NOME", NAME_WIDTH),
        pad("CPF", TAX_ID_WIDTH),
        pad("TELEFONE", PHONE_WIDTH),
        "AÇÕES"
    );
    print!("{}", pad(&heading, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// The caller passes only the rows that fit; windowing happens when the view
/// model is computed.
///
/// # Parameters
///
/// * `row` - Starting row position for the table (1-indexed)
/// * `rows` - Visible patient rows, in store order
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns (for padding)
///
/// # Returns
///
/// The next available row position (row + number of rows)
pub fn render_table_rows(row: usize, rows: &[PatientRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in rows {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single patient row at the specified row position.
///
/// The row is padded to the full width so the selection background spans the
/// whole line. Match highlights are suppressed on the selected row.
///
/// # Parameters
///
/// * `row` - Row position (1-indexed)
/// * `item` - Patient row with masked CPF, actions and highlight ranges
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
/// ▸Ana Silva                          123.456.789-01  (11) 98765-4321  [v] [e] [d]
/// ```
fn render_table_row(row: usize, item: &PatientRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("▸");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!(" ");
    }

    let name = truncate(&item.name, NAME_WIDTH - 1);
    helpers::render_highlighted_text(&name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(NAME_WIDTH.saturating_sub(char_width(&name))));

    print!("{}", pad(&item.tax_id, TAX_ID_WIDTH));
    print!("{}", pad(&item.phone, PHONE_WIDTH));

    let actions = item
        .actions
        .iter()
        .map(|action| format!("[{}]", action.kind.key()))
        .collect::<Vec<_>>()
        .join(" ");
    print!("{actions}");

    let line_len = 1 + NAME_WIDTH + TAX_ID_WIDTH + PHONE_WIDTH + char_width(&actions);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
