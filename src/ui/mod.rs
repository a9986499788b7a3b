//! Terminal rendering of the feed.
//!
//! ```text
//! ReelController / NavBar / NotificationCategory
//!     → compute_viewmodel → view models → render → ANSI output
//! ```
//!
//! - [`viewmodel`]: Display-ready view model types and overridable labels
//! - [`renderer`]: Frame assembly
//! - [`components`]: Reel overlay, navbar and notification row renderers
//! - [`helpers`]: Width, truncation and line helpers
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, Frame};
pub use theme::{Theme, ThemeColors};
pub use viewmodel::{
    ActionButton, ButtonKind, Labels, NavBarViewModel, NavItem, NotificationRowViewModel, ReelViewModel,
    VolumeIcon,
};
