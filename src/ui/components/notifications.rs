//! Notification category rows.

use crate::ui::helpers::{display_width, line, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NotificationRowViewModel;

/// Renders one row per category: title with an optional count badge, then the
/// message truncated to a single line.
pub fn render_notification_rows(out: &mut String, rows: &[NotificationRowViewModel], theme: &Theme, cols: usize) {
    let colors = &theme.colors;

    for row in rows {
        let badge = row
            .badge
            .map(|count| format!(" {count} "))
            .unwrap_or_default();
        let title_width = cols.saturating_sub(display_width(&badge) + 1);
        let title = truncate(&row.title, title_width);
        let gap = " ".repeat(cols.saturating_sub(display_width(&title) + display_width(&badge)));

        out.push_str(&format!("{}{}{title}{}{gap}", Theme::bold(), Theme::fg(&colors.text), Theme::reset()));
        if !badge.is_empty() {
            out.push_str(&format!(
                "{}{}{badge}{}",
                Theme::fg(&colors.indicator_fg),
                Theme::bg(&colors.badge_bg),
                Theme::reset()
            ));
        }
        out.push('\n');

        line(out, &row.message, &Theme::fg(&colors.text_dim), cols);
    }
}
