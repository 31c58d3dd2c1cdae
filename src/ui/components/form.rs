//! Form component renderer.
//!
//! This module renders patient form fields. The same field renderer serves
//! the new patient tab and the add and edit modals.

use crate::ui::helpers::{char_width, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormFieldView, FormView};

/// Width of the label column, including the focus marker.
const LABEL_WIDTH: usize = 22;
/// Left and right margin of the form when drawn as a tab body.
const FORM_MARGIN: usize = 3;

/// Renders one labeled field at the specified position.
///
/// Empty values show the placeholder dimmed. The focused field gets a
/// highlighted label and a cursor mark after its value. Required fields carry
/// a `*` after the label.
///
/// # Parameters
///
/// * `row` - Row position (1-indexed)
/// * `col` - First column of the field (1-indexed)
/// * `field` - Label, value, placeholder and focus state
/// * `theme` - Active color theme
/// * `width` - Total characters available for label and value
///
/// # Layout
///
/// ```text
/// ▸CPF*                 123.456.7▏
///  Data de Nascimento   DD/MM/AAAA
/// ```
pub fn render_form_field(row: usize, col: usize, field: &FormFieldView, theme: &Theme, width: usize) {
    position_cursor(row, col);

    let marker = if field.required { "*" } else { "" };
    let label = format!("{}{marker}", field.label);

    if field.is_focused {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.field_focus_fg));
        print!("▸");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!(" ");
    }
    print!("{}", pad(&label, LABEL_WIDTH - 1));
    print!("{}", Theme::reset());

    let value_width = width.saturating_sub(LABEL_WIDTH);
    let cursor = if field.is_focused { "▏" } else { "" };

    if field.value.is_empty() {
        print!("{cursor}");
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        let placeholder = truncate(&field.placeholder, value_width.saturating_sub(char_width(cursor)));
        print!("{placeholder}");
        print!(
            "{}",
            " ".repeat(value_width.saturating_sub(char_width(&placeholder) + char_width(cursor)))
        );
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        let value = truncate(
            &format!("{}{cursor}", field.value),
            value_width,
        );
        print!("{value}");
        print!("{}", " ".repeat(value_width.saturating_sub(char_width(&value))));
    }
    print!("{}", Theme::reset());
}

/// Keybinding hint drawn under a form.
///
/// ```text
/// [Enter] Salvar Paciente   [Esc] Cancelar
/// ```
#[must_use]
pub fn submit_hint(form: &FormView) -> String {
    format!("[Enter] {}   [Esc] Cancelar", form.submit_label)
}

/// Renders a form as the body of the new patient tab.
///
/// # Parameters
///
/// * `row` - Starting row position (1-indexed)
/// * `form` - Title, fields and submit label
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position, below the required-field note
///
/// # Layout
///
/// ```text
///
///    Cadastrar Novo Paciente
///
///   ▸Nome*                 ...
///    CPF*                  ...
///    (remaining fields)
///
///    [Enter] Salvar Paciente   [Esc] Cancelar
///    * campo obrigatório
/// ```
pub fn render_form_body(row: usize, form: &FormView, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(FORM_MARGIN * 2);
    let col = FORM_MARGIN + 1;

    position_cursor(row + 1, col);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad(&form.title, width));
    print!("{}", Theme::reset());

    let mut current_row = row + 3;
    for field in &form.fields {
        render_form_field(current_row, col, field, theme, width);
        current_row += 1;
    }

    current_row += 1;
    position_cursor(current_row, col);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", pad(&submit_hint(form), width));
    print!("{}", Theme::reset());

    position_cursor(current_row + 1, 1);
    print!(
        "{}{}",
        Theme::fg(&theme.colors.required_fg),
        pad(&format!("{}* campo obrigatório", " ".repeat(FORM_MARGIN)), cols)
    );
    print!("{}", Theme::reset());

    current_row + 2
}
