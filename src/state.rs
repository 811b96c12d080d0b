//! Shared application state.
//!
//! Owns the session and everything allowed to change it. Built once at
//! startup; handles are cheap to clone and share with UI code.

use std::sync::Arc;

use crate::config::ConfigV1;
use crate::gateway::ApiGateway;
use crate::navigation::{NavAction, NavigationItem, NavigationKind, Navigator, visible_items};
use crate::session::{AuthClient, SessionStore};

/// What activating a menu entry did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Navigated(String),
    LoggedOut,
    /// A host-defined action; the caller decides what it means.
    Custom(String),
    /// Nothing to do (no link and no action).
    Ignored,
}

/// Application state shared across the UI.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The current user, observable.
    pub session: SessionStore,
    /// Session probe, login and logout.
    pub auth: Arc<AuthClient>,
    /// Chokepoint for every other backend call.
    pub gateway: Arc<ApiGateway>,
    pub navigator: Arc<dyn Navigator>,
}

impl AppState {
    /// Sidebar entries the current session may see.
    pub fn visible_sidebar(&self) -> Vec<NavigationItem> {
        visible_items(&self.config.navigation.sidebar, &self.session)
    }

    pub fn visible_user_menu(&self) -> Vec<NavigationItem> {
        visible_items(&self.config.navigation.user_menu, &self.session)
    }

    /// Carry out a menu entry: actions take precedence over links.
    pub async fn activate(&self, item: &NavigationItem) -> Activation {
        match (&item.action, &item.href) {
            (Some(NavAction::Logout), _) => {
                self.auth.logout().await;
                Activation::LoggedOut
            }
            (Some(NavAction::Custom(tag)), _) => Activation::Custom(tag.clone()),
            (None, Some(href)) => {
                self.navigator.navigate(href, NavigationKind::ClientSide);
                Activation::Navigated(href.clone())
            }
            (None, None) => Activation::Ignored,
        }
    }
}
