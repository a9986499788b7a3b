//! Navbar and sheet banner component.

use crate::ui::helpers::{line, line_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NavBarViewModel;

/// Renders the navbar line and, when a sheet is open, its title banner.
pub fn render_navbar(out: &mut String, vm: &NavBarViewModel, theme: &Theme, cols: usize) {
    let dot = format!("{}●{}", Theme::fg(&theme.colors.accent), Theme::fg(&theme.colors.nav_fg));
    let items = vm
        .items
        .iter()
        .map(|item| {
            if item.badge {
                format!("{}{dot}", item.label)
            } else {
                item.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" │ ");
    line(out, &items, &Theme::fg(&theme.colors.nav_fg), usize::MAX);

    if let Some(sheet) = &vm.open_sheet {
        let style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text));
        line_centered(out, &format!("[ {sheet} ]"), &style, cols);
    }
}
