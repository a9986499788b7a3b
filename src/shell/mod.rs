//! Application shell around the feed: the navbar with its modal sheets and the
//! notification category rows shown inside the notifications sheet.
//!
//! Authentication is an external collaborator reached through [`AuthContext`];
//! the shell only reads `is_authenticated` and toggles the auth sheet it owns.

pub mod navbar;
pub mod notifications;

pub use navbar::{AuthContext, AuthSheetState, AuthTab, NavBar, NavTarget, Route, Sheet, StaticAuth};
pub use notifications::NotificationCategory;
