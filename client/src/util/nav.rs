//! Side navigation entries and role-based filtering.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use serde::Serialize;

use crate::net::types::Role;
use crate::paths::dashboard;

pub const USER_KEY: &str = "user";
pub const USER_MANAGEMENT_KEY: &str = "user-management";
pub const ADMIN_USERS_KEY: &str = "admin-users";
pub const PROMOTER_USERS_KEY: &str = "promoter-users";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub key: String,
    pub title: String,
    /// Parents that only expand/collapse have no `href`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

impl NavItem {
    #[must_use]
    pub fn link(key: &str, title: &str, href: &str, icon: &str) -> Self {
        Self {
            key: key.to_owned(),
            title: title.to_owned(),
            href: Some(href.to_owned()),
            icon: Some(icon.to_owned()),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(key: &str, title: &str, icon: &str, items: Vec<NavItem>) -> Self {
        Self { key: key.to_owned(), title: title.to_owned(), href: None, icon: Some(icon.to_owned()), items }
    }
}

/// The full static navigation list, before any role filtering.
#[must_use]
pub fn default_nav_items() -> Vec<NavItem> {
    vec![
        NavItem::link(USER_KEY, "Users", dashboard::USER, "userfocus"),
        NavItem::link("vehicle-search", "Vehicle Search", dashboard::VEHICLE_SEARCH, "car"),
        NavItem::link("taxis", "Taxis", dashboard::TAXIS, "taxi"),
        NavItem::link("feedback", "Feedback", dashboard::FEEDBACK, "note-pencil"),
        NavItem::link("overview", "Overview", dashboard::OVERVIEW, "chart-pie"),
        NavItem::group(
            USER_MANAGEMENT_KEY,
            "User Management",
            "users",
            vec![
                NavItem::link(ADMIN_USERS_KEY, "Admin Users", dashboard::ADMIN_USERS, "user-gear"),
                NavItem::link(PROMOTER_USERS_KEY, "Promoter Users", dashboard::PROMOTER_USERS, "user-list"),
            ],
        ),
        NavItem::link("employee", "Add Employee", dashboard::EMPLOYEE, "user-plus"),
        NavItem::link("account", "Account", dashboard::ACCOUNT, "user"),
    ]
}

/// Entries visible to `role`.
///
/// - promoter: no `user`, no `user-management`;
/// - admin: `user-management` narrowed to `promoter-users`;
/// - anyone else (superadmin, unknown role, no user): everything.
#[must_use]
pub fn filter_nav_items(items: &[NavItem], role: Option<&Role>) -> Vec<NavItem> {
    match role {
        Some(Role::Promoter) => items
            .iter()
            .filter(|item| item.key != USER_KEY && item.key != USER_MANAGEMENT_KEY)
            .cloned()
            .collect(),
        Some(Role::Admin) => items
            .iter()
            .map(|item| {
                if item.key == USER_MANAGEMENT_KEY && !item.items.is_empty() {
                    NavItem {
                        items: item.items.iter().filter(|sub| sub.key == PROMOTER_USERS_KEY).cloned().collect(),
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect(),
        _ => items.to_vec(),
    }
}

/// Whether the entry `key` (top-level or nested) survives filtering.
#[must_use]
pub fn is_visible(items: &[NavItem], key: &str) -> bool {
    items.iter().any(|item| item.key == key || is_visible(&item.items, key))
}
