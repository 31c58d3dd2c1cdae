//! Shared rendering utilities.
//!
//! Cursor positioning, character-aware truncation and padding, and match
//! highlighting with proper ANSI reset handling. Widths are measured in
//! characters, not bytes, since patient names routinely contain accents.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, ending in `...` when cut.
///
/// ```
/// use patient_registry::ui::helpers::truncate;
///
/// assert_eq!(truncate("Maria José da Silva", 10), "Maria J...");
/// assert_eq!(truncate("Ana", 10), "Ana");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if char_width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Pads `text` with spaces to exactly `width` characters, truncating first.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let fill = width.saturating_sub(char_width(&text));
    format!("{text}{}", " ".repeat(fill))
}

/// Prints `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, exclusive end. Highlighting
/// is skipped on the selected row so it does not fight the selection colors.
/// Ranges past the end of `text` are clipped.
///
/// # Parameters
///
/// * `text` - Text to print, already truncated to its column
/// * `ranges` - Sorted, non-overlapping character ranges to highlight
/// * `theme` - Active color theme
/// * `is_selected` - Whether the row is selected
///
/// # ANSI Handling
///
/// After each highlighted section the style is reset and the normal text
/// color restored, so the rest of the row keeps its color.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Conceição", 9), "Conceição");
        assert_eq!(truncate("Conceição Andrade", 12), "Conceição...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("Zé", 4), "Zé  ");
        assert_eq!(pad("Maria", 4), "M...");
    }
}
