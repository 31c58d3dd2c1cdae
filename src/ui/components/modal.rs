//! Modal component renderer.
//!
//! This module renders the topmost modal over the rest of the screen: the
//! add and edit forms, the patient detail panel and the delete prompt.
//!
//! The box geometry comes from [`modal_rect`] so mouse hit testing and
//! drawing always agree on where the modal and its `[x]` control are.
//!
//! # Layout
//!
//! ```text
//! ┌ Detalhes do Paciente ─────────────────────────────── [x] ┐
//! │                                                          │
//! │ Nome Completo       Ana Silva                            │
//! │ CPF                 123.456.789-01                       │
//! │ ...                                                      │
//! └──────────────────────────────────────────────────────────┘
//! ```

use crate::ui::components::form::{render_form_field, submit_hint};
use crate::ui::helpers::{pad, position_cursor, truncate};
use crate::ui::layout::{modal_rect, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ConfirmView, DetailView, FormView, ModalInfo, ModalView};

/// Width of the label column in the detail panel.
const DETAIL_LABEL_WIDTH: usize = 20;

/// Inner content column and width of `rect`.
const fn inner(rect: &Rect) -> (usize, usize) {
    (rect.col + 2, rect.width.saturating_sub(4))
}

/// Screen row for content line `offset`, if it still fits above the bottom border.
const fn content_row(rect: &Rect, offset: usize) -> Option<usize> {
    let row = rect.row + offset;
    if row < rect.bottom() {
        Some(row)
    } else {
        None
    }
}

/// Renders a modal centered on the screen.
///
/// Draws the frame with title and `[x]`, clears the interior and fills it
/// with the view's content. Panes too small to hold a frame are skipped.
///
/// # Parameters
///
/// * `modal` - Modal kind (fixes the geometry) and its content
/// * `theme` - Active color theme
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let rect = modal_rect(modal.kind, rows, cols);
    if rect.width < 8 || rect.height < 3 {
        return;
    }

    let title = match &modal.view {
        ModalView::Form(form) => form.title.as_str(),
        ModalView::Detail(detail) => detail.title.as_str(),
        ModalView::Confirm(confirm) => confirm.title.as_str(),
    };
    render_frame(&rect, title, theme);

    match &modal.view {
        ModalView::Form(form) => render_form_content(&rect, form, theme),
        ModalView::Detail(detail) => render_detail_content(&rect, detail, theme),
        ModalView::Confirm(confirm) => render_confirm_content(&rect, confirm, theme),
    }
}

/// Border, title, close control and a cleared interior.
fn render_frame(rect: &Rect, title: &str, theme: &Theme) {
    let inner_width = rect.width.saturating_sub(2);

    position_cursor(rect.row, rect.col);
    print!("{}", Theme::fg(&theme.colors.modal_border));
    print!("┌{}┐", "─".repeat(inner_width));

    for row in rect.row + 1..rect.bottom() {
        position_cursor(row, rect.col);
        print!("│{}│", " ".repeat(inner_width));
    }

    position_cursor(rect.bottom(), rect.col);
    print!("└{}┘", "─".repeat(inner_width));

    let close = rect.close_control();
    let title = truncate(&format!(" {title} "), close.col.saturating_sub(rect.col + 3));
    position_cursor(rect.row, rect.col + 2);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());

    position_cursor(close.row, close.col);
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("[x]");
    print!("{}", Theme::reset());
}

/// Form fields from content line 2, the submit hint one line below the last.
fn render_form_content(rect: &Rect, form: &FormView, theme: &Theme) {
    let (col, width) = inner(rect);

    for (idx, field) in form.fields.iter().enumerate() {
        if let Some(row) = content_row(rect, 2 + idx) {
            render_form_field(row, col, field, theme, width);
        }
    }

    if let Some(row) = content_row(rect, 3 + form.fields.len()) {
        position_cursor(row, col);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", pad(&submit_hint(form), width));
        print!("{}", Theme::reset());
    }
}

/// One `label value` line per field.
fn render_detail_content(rect: &Rect, detail: &DetailView, theme: &Theme) {
    let (col, width) = inner(rect);

    for (idx, (label, value)) in detail.fields.iter().enumerate() {
        let Some(row) = content_row(rect, 2 + idx) else {
            break;
        };
        position_cursor(row, col);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", pad(label, DETAIL_LABEL_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", pad(value, width.saturating_sub(DETAIL_LABEL_WIDTH)));
        print!("{}", Theme::reset());
    }
}

/// Message naming the patient, then the `[y]`/`[n]` prompt.
fn render_confirm_content(rect: &Rect, confirm: &ConfirmView, theme: &Theme) {
    let (col, width) = inner(rect);

    if let Some(row) = content_row(rect, 2) {
        position_cursor(row, col);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", pad(&confirm.message, width));
        print!("{}", Theme::reset());
    }

    if let Some(row) = content_row(rect, 4) {
        position_cursor(row, col);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print!("[y] Sim");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("   [n] Não");
        print!("{}", Theme::reset());
    }
}
