//! Navigation: the redirect seam used by the session layer, login locations,
//! and the role-gated menus.

pub mod menu;
pub mod navigator;
pub mod redirect;

pub use menu::{NavAction, NavigationItem, sidebar_navigation, user_menu_items, visible_items};
pub use navigator::{HistoryNavigator, NavigationEntry, NavigationKind, Navigator};
pub use redirect::{RedirectReason, login_location};
