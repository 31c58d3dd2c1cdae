//! Screen geometry shared by the renderer and mouse hit testing.
//!
//! All coordinates are 1-indexed terminal cells, matching
//! [`position_cursor`](crate::ui::helpers::position_cursor).

use crate::app::modes::ModalKind;

/// First row used by the header (row 1 stays blank).
pub const HEADER_ROW: usize = 2;

/// Rows taken by everything around the patient list: blank line, header,
/// tabs, border, banner, table heading, footer border and footer.
pub const LIST_CHROME_ROWS: usize = 8;

/// Extra rows taken by the boxed search bar.
pub const SEARCH_BAR_ROWS: usize = 3;

const MODAL_MAX_WIDTH: usize = 64;
const MODAL_MARGIN_COLS: usize = 4;
const MODAL_MARGIN_ROWS: usize = 2;
const CLOSE_CONTROL_WIDTH: usize = 3;

/// A rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Top row, 1-indexed.
    pub row: usize,
    /// Left column, 1-indexed.
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }

    /// The `[x]` control drawn into the top border, right aligned.
    #[must_use]
    pub const fn close_control(&self) -> Self {
        Self {
            row: self.row,
            col: self.col + self.width.saturating_sub(CLOSE_CONTROL_WIDTH + 2),
            width: CLOSE_CONTROL_WIDTH,
            height: 1,
        }
    }

    /// Last row inside the rectangle.
    #[must_use]
    pub const fn bottom(&self) -> usize {
        self.row + self.height.saturating_sub(1)
    }
}

/// Preferred height of each modal, borders included.
#[must_use]
pub const fn modal_height(kind: ModalKind) -> usize {
    match kind {
        // border, title gap, 7 fields, gap, submit hint, border
        ModalKind::Add | ModalKind::Edit => 12,
        // border, title gap, 7 fields, border
        ModalKind::View => 10,
        // border, gap, message, gap, prompt, border
        ModalKind::ConfirmDelete => 6,
    }
}

/// Where a modal of `kind` is drawn on a `rows` x `cols` screen.
///
/// Modals are centered and shrink to fit small panes.
///
/// # Parameters
///
/// * `kind` - Modal kind, which fixes the preferred height
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The modal's rectangle, borders included, in 1-indexed cells.
#[must_use]
pub fn modal_rect(kind: ModalKind, rows: usize, cols: usize) -> Rect {
    let width = MODAL_MAX_WIDTH.min(cols.saturating_sub(MODAL_MARGIN_COLS));
    let height = modal_height(kind).min(rows.saturating_sub(MODAL_MARGIN_ROWS));
    Rect {
        row: rows.saturating_sub(height) / 2 + 1,
        col: cols.saturating_sub(width) / 2 + 1,
        width,
        height,
    }
}

/// What a click on an open modal hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    /// The `[x]` close control.
    CloseControl,
    /// Inside the modal content.
    Content,
    /// Outside the modal, on the backdrop.
    Backdrop,
}

/// Classifies a click against the modal of `kind`.
///
/// Uses the same geometry as the renderer, so a click lands where the user
/// saw the modal.
///
/// # Parameters
///
/// * `kind` - Kind of the topmost modal
/// * `rows`, `cols` - Screen size at the last render
/// * `row`, `col` - Click position, 1-indexed
#[must_use]
pub fn hit_test_modal(kind: ModalKind, rows: usize, cols: usize, row: usize, col: usize) -> ModalHit {
    let rect = modal_rect(kind, rows, cols);
    if rect.close_control().contains(row, col) {
        ModalHit::CloseControl
    } else if rect.contains(row, col) {
        ModalHit::Content
    } else {
        ModalHit::Backdrop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_is_centered() {
        let rect = modal_rect(ModalKind::ConfirmDelete, 30, 100);
        assert_eq!(rect.width, 64);
        assert_eq!(rect.height, 6);
        assert_eq!(rect.col, 19);
        assert_eq!(rect.row, 13);
    }

    #[test]
    fn test_modal_shrinks_on_small_pane() {
        let rect = modal_rect(ModalKind::Edit, 8, 40);
        assert_eq!(rect.width, 36);
        assert_eq!(rect.height, 6);
        assert!(rect.bottom() <= 8);
    }

    #[test]
    fn test_hit_testing() {
        let rect = modal_rect(ModalKind::View, 30, 100);
        let close = rect.close_control();

        assert_eq!(hit_test_modal(ModalKind::View, 30, 100, 1, 1), ModalHit::Backdrop);
        assert_eq!(
            hit_test_modal(ModalKind::View, 30, 100, rect.row + 1, rect.col + 1),
            ModalHit::Content
        );
        assert_eq!(
            hit_test_modal(ModalKind::View, 30, 100, close.row, close.col + 1),
            ModalHit::CloseControl
        );
    }
}
