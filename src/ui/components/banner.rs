//! Notification banner component renderer.
//!
//! This module renders the single banner line below the tab border. The line
//! is always reserved, so showing or clearing a banner never shifts the
//! table.

use crate::app::notification::NotificationKind;
use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BannerInfo;

/// Renders the notification banner at the specified row.
///
/// Successes are drawn in the success color with `✓`, errors in the error
/// color with `✗`. With no banner the line is blanked.
///
/// # Parameters
///
/// * `row` - Row position to render the banner (1-indexed)
/// * `banner` - Current banner, if any
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
///  ✓ Paciente criado com sucesso!
/// ```
pub fn render_banner(row: usize, banner: Option<&BannerInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(banner) = banner else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let (color, icon) = match banner.kind {
        NotificationKind::Success => (&theme.colors.success_fg, '✓'),
        NotificationKind::Error => (&theme.colors.error_fg, '✗'),
    };

    print!("{}", Theme::bold());
    print!("{}", Theme::fg(color));
    print!("{}", pad(&format!(" {icon} {}", banner.message), cols));
    print!("{}", Theme::reset());
    row + 1
}
