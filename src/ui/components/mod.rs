//! Composable UI component renderers.
//!
//! Each component appends ANSI-styled lines to a `String` buffer.
//!
//! - [`reel`]: Reel overlay (volume, indicator, seller, product, buttons)
//! - [`navbar`]: Navbar line and open-sheet banner
//! - [`notifications`]: Notification category rows

mod navbar;
mod notifications;
mod reel;

pub use navbar::render_navbar;
pub use notifications::render_notification_rows;
pub use reel::render_reel;
