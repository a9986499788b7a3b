//! Navbar state: route intents and modal sheet visibility.
//!
//! Four sheets (search, notifications, profile, create-post) are owned by the
//! navbar. The auth sheet is owned by the [`AuthContext`] so that any screen
//! can request a login. At most one sheet is presented at a time; opening a
//! sheet replaces the one below it, and the auth sheet takes precedence.

use crate::ui::viewmodel::{Labels, NavBarViewModel, NavItem};
use std::fmt;

/// A modal overlay reachable from the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    Search,
    Auth,
    Notifications,
    Profile,
    CreatePost,
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            Self::Search => "Search",
            Self::Auth => "Sign in",
            Self::Notifications => "Notifications",
            Self::Profile => "Profile",
            Self::CreatePost => "Create post",
        };
        f.write_str(title)
    }
}

/// Tab the auth sheet opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Visibility of the auth sheet as stored by the auth context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSheetState {
    pub is_open: bool,
    pub default_tab: AuthTab,
}

/// Shared authentication state supplied by the host.
pub trait AuthContext {
    fn is_authenticated(&self) -> bool;
    fn show_auth_sheet(&self) -> AuthSheetState;
    fn set_show_auth_sheet(&mut self, state: AuthSheetState);
}

/// Fixed authentication state for hosts without a login flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAuth {
    pub authenticated: bool,
    pub sheet: AuthSheetState,
}

impl AuthContext for StaticAuth {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn show_auth_sheet(&self) -> AuthSheetState {
        self.sheet
    }

    fn set_show_auth_sheet(&mut self, state: AuthSheetState) {
        self.sheet = state;
    }
}

/// Navigation destinations handled by the host router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Reels,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Reels => "/reels",
        }
    }
}

/// Tappable navbar entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Reels,
    Search,
    CreatePost,
    Notifications,
    Account,
}

/// Navbar with its locally owned sheet.
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    open: Option<Sheet>,
}

impl NavBar {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: None }
    }

    /// Handles a tap; returns the route to navigate to, if any.
    ///
    /// ```
    /// use reelfeed::shell::{AuthContext, NavBar, NavTarget, Route, Sheet, StaticAuth};
    ///
    /// let mut auth = StaticAuth::default();
    /// let mut nav = NavBar::new();
    ///
    /// assert_eq!(nav.tap(NavTarget::Reels, &mut auth), Some(Route::Reels));
    /// nav.tap(NavTarget::Account, &mut auth);
    /// assert!(auth.show_auth_sheet().is_open);
    /// assert_eq!(nav.open_sheet(&auth), Some(Sheet::Auth));
    /// ```
    pub fn tap<A: AuthContext + ?Sized>(&mut self, target: NavTarget, auth: &mut A) -> Option<Route> {
        let _span = tracing::debug_span!("navbar_tap", ?target).entered();

        match target {
            NavTarget::Home => Some(Route::Home),
            NavTarget::Reels => Some(Route::Reels),
            NavTarget::Search => self.present(Sheet::Search),
            NavTarget::CreatePost => self.present(Sheet::CreatePost),
            NavTarget::Notifications => self.present(Sheet::Notifications),
            NavTarget::Account if auth.is_authenticated() => self.present(Sheet::Profile),
            NavTarget::Account => {
                auth.set_show_auth_sheet(AuthSheetState { is_open: true, default_tab: AuthTab::Login });
                tracing::debug!("not authenticated, requesting auth sheet");
                None
            }
        }
    }

    fn present(&mut self, sheet: Sheet) -> Option<Route> {
        self.open = Some(sheet);
        tracing::debug!(%sheet, "sheet opened");
        None
    }

    /// Whether `sheet` is open.
    #[must_use]
    pub fn is_open<A: AuthContext + ?Sized>(&self, sheet: Sheet, auth: &A) -> bool {
        match sheet {
            Sheet::Auth => auth.show_auth_sheet().is_open,
            other => self.open == Some(other),
        }
    }

    /// The sheet currently presented.
    #[must_use]
    pub fn open_sheet<A: AuthContext + ?Sized>(&self, auth: &A) -> Option<Sheet> {
        if auth.show_auth_sheet().is_open {
            Some(Sheet::Auth)
        } else {
            self.open
        }
    }

    /// Closes `sheet`. Closing the auth sheet resets its tab to login.
    pub fn close<A: AuthContext + ?Sized>(&mut self, sheet: Sheet, auth: &mut A) {
        match sheet {
            Sheet::Auth => auth.set_show_auth_sheet(AuthSheetState { is_open: false, default_tab: AuthTab::Login }),
            other if self.open == Some(other) => self.open = None,
            _ => return,
        }
        tracing::debug!(%sheet, "sheet closed");
    }

    /// Closes whichever sheet is presented.
    pub fn close_top<A: AuthContext + ?Sized>(&mut self, auth: &mut A) {
        if let Some(sheet) = self.open_sheet(auth) {
            self.close(sheet, auth);
        }
    }

    #[must_use]
    pub fn compute_viewmodel<A: AuthContext + ?Sized>(&self, auth: &A, labels: &Labels) -> NavBarViewModel {
        let item = |label: &str, badge: bool| NavItem { label: label.to_string(), badge };

        NavBarViewModel {
            items: vec![
                item("⌂ Home", false),
                item("▶ Reels", false),
                item(&format!("⌕ {}", labels.search_placeholder), false),
                item("＋", false),
                item("🔔", true),
                item("👤", false),
            ],
            open_sheet: self.open_sheet(auth).map(|sheet| sheet.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_do_not_open_sheets() {
        let mut auth = StaticAuth::default();
        let mut nav = NavBar::new();

        assert_eq!(nav.tap(NavTarget::Home, &mut auth), Some(Route::Home));
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(nav.open_sheet(&auth), None);
    }

    #[test]
    fn sheets_open_and_close() {
        let mut auth = StaticAuth::default();
        let mut nav = NavBar::new();

        nav.tap(NavTarget::Search, &mut auth);
        assert!(nav.is_open(Sheet::Search, &auth));

        nav.tap(NavTarget::Notifications, &mut auth);
        assert!(!nav.is_open(Sheet::Search, &auth));
        assert!(nav.is_open(Sheet::Notifications, &auth));

        nav.close(Sheet::Search, &mut auth);
        assert!(nav.is_open(Sheet::Notifications, &auth));

        nav.close(Sheet::Notifications, &mut auth);
        assert_eq!(nav.open_sheet(&auth), None);
    }

    #[test]
    fn account_opens_profile_when_authenticated() {
        let mut auth = StaticAuth { authenticated: true, ..StaticAuth::default() };
        let mut nav = NavBar::new();

        nav.tap(NavTarget::Account, &mut auth);
        assert_eq!(nav.open_sheet(&auth), Some(Sheet::Profile));
        assert!(!auth.show_auth_sheet().is_open);
    }

    #[test]
    fn account_requests_login_when_anonymous() {
        let mut auth = StaticAuth::default();
        let mut nav = NavBar::new();

        nav.tap(NavTarget::CreatePost, &mut auth);
        nav.tap(NavTarget::Account, &mut auth);
        assert_eq!(auth.show_auth_sheet(), AuthSheetState { is_open: true, default_tab: AuthTab::Login });
        assert_eq!(nav.open_sheet(&auth), Some(Sheet::Auth));

        nav.close_top(&mut auth);
        assert!(!auth.show_auth_sheet().is_open);
        assert_eq!(nav.open_sheet(&auth), Some(Sheet::CreatePost));
    }

    #[test]
    fn viewmodel_marks_notifications_and_open_sheet() {
        let mut auth = StaticAuth::default();
        let mut nav = NavBar::new();
        nav.tap(NavTarget::Search, &mut auth);

        let vm = nav.compute_viewmodel(&auth, &Labels::default());
        assert_eq!(vm.open_sheet.as_deref(), Some("Search"));
        assert_eq!(vm.items.iter().filter(|item| item.badge).count(), 1);
        assert!(vm.items.iter().any(|item| item.label.contains("Axtarış...")));
    }
}
