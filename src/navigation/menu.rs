use schemars::JsonSchema;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use serde::{Deserialize, Serialize};

use crate::session::SessionStore;

/// Something a menu entry does instead of following a link.
/// Serialized as a bare tag: `logout`, or any other string for host-defined actions.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum NavAction {
    Logout,
    Custom(String),
}

impl From<String> for NavAction {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "logout" => NavAction::Logout,
            _ => NavAction::Custom(tag),
        }
    }
}

impl From<NavAction> for String {
    fn from(action: NavAction) -> Self {
        match action {
            NavAction::Logout => "logout".to_string(),
            NavAction::Custom(tag) => tag,
        }
    }
}

impl JsonSchema for NavAction {
    fn schema_name() -> String {
        "NavAction".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }
}

/// A declarative menu entry. Built once at startup and never mutated.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Icon reference, resolved by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationItem>,
    /// Role gate: the item is shown only if the user holds one of these roles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Path prefix that marks this item active, overriding `href`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_match: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<NavAction>,
}

impl NavigationItem {
    pub fn link(label: &str, href: &str) -> Self {
        NavigationItem {
            label: label.to_string(),
            href: Some(href.to_string()),
            icon: None,
            children: Vec::new(),
            permissions: Vec::new(),
            active_match: None,
            action: None,
        }
    }

    pub fn action(label: &str, action: NavAction) -> Self {
        NavigationItem {
            href: None,
            action: Some(action),
            ..Self::link(label, "")
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<NavigationItem>) -> Self {
        self.children = children;
        self
    }

    pub fn with_permissions(mut self, roles: &[&str]) -> Self {
        self.permissions = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn is_visible_to(&self, session: &SessionStore) -> bool {
        session.has_any_role(&self.permissions)
    }

    /// True if the current `path` belongs to this item.
    pub fn is_active(&self, path: &str) -> bool {
        let prefix = match (&self.active_match, &self.href) {
            (Some(prefix), _) => prefix,
            (None, Some(href)) => href,
            (None, None) => return false,
        };
        path == prefix
            || path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Filter a menu down to what the current session may see. Gates are
/// evaluated against the live session on every call.
pub fn visible_items(items: &[NavigationItem], session: &SessionStore) -> Vec<NavigationItem> {
    items
        .iter()
        .filter(|item| item.is_visible_to(session))
        .map(|item| NavigationItem {
            children: visible_items(&item.children, session),
            ..item.clone()
        })
        .collect()
}

/// Menu shown from the user avatar.
pub fn user_menu_items() -> Vec<NavigationItem> {
    vec![
        NavigationItem::link("Settings", "/settings").with_icon("settings"),
        NavigationItem::action("Logout", NavAction::Logout).with_icon("log-out"),
    ]
}

pub fn sidebar_navigation() -> Vec<NavigationItem> {
    vec![
        NavigationItem::link("Dashboard", "/dashboard").with_icon("house"),
        NavigationItem::link("Projects", "/projects")
            .with_icon("folders")
            .with_children(vec![
                NavigationItem::link("All Projects", "/projects"),
                NavigationItem::link("Create New", "/projects/new"),
            ]),
        NavigationItem::link("Clients", "/clients").with_icon("users"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session_with_roles(roles: Option<Vec<String>>) -> SessionStore {
        let store = SessionStore::new();
        store.set_user(User::new(1, "A", "B", "a@b.com", roles));
        store
    }

    fn gated_menu() -> Vec<NavigationItem> {
        vec![
            NavigationItem::link("Dashboard", "/dashboard"),
            NavigationItem::link("Admin", "/admin")
                .with_permissions(&["admin"])
                .with_children(vec![NavigationItem::link("Users", "/admin/users")]),
            NavigationItem::link("Reports", "/reports").with_children(vec![
                NavigationItem::link("All", "/reports"),
                NavigationItem::link("Billing", "/reports/billing")
                    .with_permissions(&["admin", "finance"]),
            ]),
        ]
    }

    fn labels(items: &[NavigationItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn gated_items_hidden_without_session() {
        let visible = visible_items(&gated_menu(), &SessionStore::new());
        assert_eq!(labels(&visible), vec!["Dashboard", "Reports"]);
        assert_eq!(labels(&visible[1].children), vec!["All"]);
    }

    #[test]
    fn gated_items_shown_for_matching_role() {
        let session = session_with_roles(Some(vec!["finance".to_string()]));
        let visible = visible_items(&gated_menu(), &session);
        assert_eq!(labels(&visible), vec!["Dashboard", "Reports"]);
        assert_eq!(labels(&visible[1].children), vec!["All", "Billing"]);

        session.set_user(User::new(1, "A", "B", "a@b.com", Some(vec!["admin".into()])));
        let visible = visible_items(&gated_menu(), &session);
        assert_eq!(labels(&visible), vec!["Dashboard", "Admin", "Reports"]);
    }

    #[test]
    fn user_without_roles_sees_ungated_items_only() {
        let session = session_with_roles(None);
        let visible = visible_items(&gated_menu(), &session);
        assert_eq!(labels(&visible), vec!["Dashboard", "Reports"]);
    }

    #[test]
    fn active_matching_respects_segments_and_override() {
        let projects = NavigationItem::link("Projects", "/projects");
        assert!(projects.is_active("/projects"));
        assert!(projects.is_active("/projects/42"));
        assert!(!projects.is_active("/projectsarchive"));

        let overridden = NavigationItem {
            active_match: Some("/clients".to_string()),
            ..NavigationItem::link("Clients", "/clients/list")
        };
        assert!(overridden.is_active("/clients/7"));

        let logout = &user_menu_items()[1];
        assert!(!logout.is_active("/"));
    }

    #[test]
    fn menu_deserializes_from_yaml_like_json() {
        let item: NavigationItem = serde_json::from_value(serde_json::json!({
            "label": "Logout",
            "action": "logout"
        }))
        .unwrap();
        assert_eq!(item.action, Some(NavAction::Logout));

        let custom: NavigationItem = serde_json::from_value(serde_json::json!({
            "label": "Help",
            "action": "open-help"
        }))
        .unwrap();
        assert_eq!(custom.action, Some(NavAction::Custom("open-help".to_string())));
    }

    #[test]
    fn default_menus_have_expected_shape() {
        let sidebar = sidebar_navigation();
        assert_eq!(labels(&sidebar), vec!["Dashboard", "Projects", "Clients"]);
        assert_eq!(sidebar[1].children.len(), 2);

        let user_menu = user_menu_items();
        assert_eq!(user_menu[1].action, Some(NavAction::Logout));
        assert!(user_menu[1].href.is_none());
    }
}
