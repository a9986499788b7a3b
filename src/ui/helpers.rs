//! Shared rendering utilities.
//!
//! Widths are measured in `char`s, which is exact for the Latin and Azerbaijani
//! labels this crate ships with.

use crate::ui::theme::Theme;
use std::fmt::Write;

/// Display width of `text` in terminal columns.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Truncates `text` to `max` columns, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Writes one line of `text`, centered in `cols`, wrapped in `style`.
pub fn line_centered(out: &mut String, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let width = display_width(&text);
    let left = cols.saturating_sub(width) / 2;
    let right = cols.saturating_sub(left + width);

    let _ = writeln!(
        out,
        "{style}{}{text}{}{}",
        " ".repeat(left),
        " ".repeat(right),
        Theme::reset()
    );
}

/// Writes one left-aligned line of `text` wrapped in `style`.
pub fn line(out: &mut String, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let _ = writeln!(out, "{style}{text}{}", Theme::reset());
}

/// Writes a horizontal separator.
pub fn border(out: &mut String, color: &str, cols: usize) {
    let _ = writeln!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
}
