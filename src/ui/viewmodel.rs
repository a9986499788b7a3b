//! View model types representing renderable UI state.
//!
//! View models are computed from controller, navbar and notification state and
//! consumed by the renderer. They carry display-ready strings and flags only.

use serde::{Deserialize, Serialize};

/// User-facing strings of the reel overlay.
///
/// Defaults are the Azerbaijani strings the application ships with. Any subset
/// can be overridden from the `[labels]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Mute indicator text while muted ("turn the sound on").
    pub muted_indicator: String,
    /// Mute indicator text while unmuted ("sound is on").
    pub unmuted_indicator: String,
    /// Scroll hint on the first reel ("swipe down").
    pub scroll_hint: String,
    /// Role shown under the username.
    pub seller: String,
    pub share: String,
    pub buy: String,
    /// Placeholder text of the navbar search field.
    pub search_placeholder: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            muted_indicator: "Səsi açın".to_string(),
            unmuted_indicator: "Səs açıldı".to_string(),
            scroll_hint: "Aşağı sürüşdür".to_string(),
            seller: "Satıcı".to_string(),
            share: "Paylaş".to_string(),
            buy: "Al".to_string(),
            search_placeholder: "Axtarış...".to_string(),
        }
    }
}

/// Volume control glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Unmuted,
}

/// Side action button of a reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Like,
    Comment,
    Share,
    Buy,
}

/// A side action button with its caption (a count or a label).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub kind: ButtonKind,
    pub caption: String,
}

/// Complete overlay of one reel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelViewModel {
    pub username: String,
    pub seller_label: String,
    pub avatar: String,
    pub title: String,
    /// Price with currency sign.
    pub price: String,
    /// Poster image, present while the reel is paused.
    pub poster: Option<String>,
    pub volume_icon: VolumeIcon,
    /// Transient mute indicator text, present while the indicator is shown.
    pub mute_indicator: Option<String>,
    /// Scroll hint, present only on the first reel while it is active.
    pub scroll_hint: Option<String>,
    pub buttons: Vec<ActionButton>,
}

/// Navbar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    /// Shows the unread dot next to the item.
    pub badge: bool,
}

/// Navbar line plus the sheet currently covering the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarViewModel {
    pub items: Vec<NavItem>,
    /// Title of the open sheet, if any.
    pub open_sheet: Option<String>,
}

/// One notification category row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRowViewModel {
    pub title: String,
    pub message: String,
    /// Unread count, present only when non-zero.
    pub badge: Option<u32>,
    /// Base colour name used for the icon tint and badge.
    pub base_color: Option<String>,
}
