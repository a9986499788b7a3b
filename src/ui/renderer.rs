//! Top-level rendering coordinator.
//!
//! Assembles one frame from the navbar, the active reel overlay and, when the
//! notifications sheet is open, its category rows:
//!
//! ```text
//! navbar line
//! [open sheet banner]
//! ──────────────
//! reel overlay | notification rows
//! ──────────────
//! ```

use crate::ui::components;
use crate::ui::helpers::border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{NavBarViewModel, NotificationRowViewModel, ReelViewModel};

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub nav: &'a NavBarViewModel,
    pub reel: Option<&'a ReelViewModel>,
    /// Rows of the notifications sheet; rendered in place of the reel when set.
    pub notifications: Option<&'a [NotificationRowViewModel]>,
}

/// Renders a frame into a string of ANSI-styled lines.
///
/// ```
/// use reelfeed::ui::{render, Frame, NavBarViewModel, Theme};
///
/// let nav = NavBarViewModel { items: vec![], open_sheet: None };
/// let out = render(&Frame { nav: &nav, reel: None, notifications: None }, &Theme::default(), 40);
/// assert!(out.contains("─"));
/// ```
#[must_use]
pub fn render(frame: &Frame<'_>, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    components::render_navbar(&mut out, frame.nav, theme, cols);
    border(&mut out, &theme.colors.border, cols);

    if let Some(rows) = frame.notifications {
        components::render_notification_rows(&mut out, rows, theme, cols);
    } else if let Some(reel) = frame.reel {
        components::render_reel(&mut out, reel, theme, cols);
    }

    border(&mut out, &theme.colors.border, cols);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{ActionButton, ButtonKind, NavItem, VolumeIcon};

    fn reel_vm() -> ReelViewModel {
        ReelViewModel {
            username: "aysel".to_string(),
            seller_label: "Satıcı".to_string(),
            avatar: "a.png".to_string(),
            title: "Kətan köynək".to_string(),
            price: "₼45".to_string(),
            poster: Some("thumb.jpg".to_string()),
            volume_icon: VolumeIcon::Muted,
            mute_indicator: Some("Səsi açın".to_string()),
            scroll_hint: None,
            buttons: vec![ActionButton { kind: ButtonKind::Like, caption: "12".to_string() }],
        }
    }

    #[test]
    fn renders_reel_overlay_under_navbar() {
        let nav = NavBarViewModel {
            items: vec![NavItem { label: "Home".to_string(), badge: false }],
            open_sheet: None,
        };
        let vm = reel_vm();
        let out = render(&Frame { nav: &nav, reel: Some(&vm), notifications: None }, &Theme::default(), 40);

        let home = out.find("Home").unwrap();
        let price = out.find("₼45").unwrap();
        assert!(home < price);
        assert!(out.contains("Səsi açın"));
        assert!(out.contains("[thumb.jpg]"));
    }

    #[test]
    fn notifications_replace_reel() {
        let nav = NavBarViewModel { items: vec![], open_sheet: Some("Notifications".to_string()) };
        let vm = reel_vm();
        let rows = vec![NotificationRowViewModel {
            title: "Orders".to_string(),
            message: "Your order shipped".to_string(),
            badge: Some(3),
            base_color: Some("green".to_string()),
        }];
        let out = render(
            &Frame { nav: &nav, reel: Some(&vm), notifications: Some(&rows) },
            &Theme::default(),
            40,
        );

        assert!(out.contains("[ Notifications ]"));
        assert!(out.contains(" 3 "));
        assert!(!out.contains("₼45"));
    }
}
