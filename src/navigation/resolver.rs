use std::collections::BTreeMap;

use serde::Serialize;

use super::definition::{NavItem, NavigationTree};

/// External permission capability. How permissions are stored or loaded is
/// the caller's concern; the resolver only asks these two questions.
pub trait UserContext {
    fn is_super_admin(&self) -> bool;
    /// True if the user holds at least one of the listed permissions.
    fn has_any_permission(&self, required: &[String]) -> bool;
}

/// One step in the ancestor path from the menu root to a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub key: String,
    pub label: String,
}

// Visibility rule: super-admin sees everything, an empty permission list is
// public, otherwise any single matching permission grants visibility.
fn is_visible(user: &dyn UserContext, item: &NavItem) -> bool {
    user.is_super_admin()
        || item.permissions.is_empty()
        || user.has_any_permission(&item.permissions)
}

// Filter one level, recursing into children. An item failing its own check
// is dropped even if children would pass; a visible item keeps its place
// even when every child filters away. Stable sort preserves definition
// order between equal weights.
fn filter_items(user: &dyn UserContext, items: &[NavItem]) -> Vec<NavItem> {
    let mut kept: Vec<NavItem> = items
        .iter()
        .filter(|item| is_visible(user, item))
        .map(|item| {
            let mut visible = item.clone();
            visible.children = filter_items(user, &item.children);
            visible
        })
        .collect();
    kept.sort_by_key(|item| item.order);
    kept
}

fn find_path<'a>(items: &'a [NavItem], key: &str) -> Option<Vec<&'a NavItem>> {
    for item in items {
        if item.key == key {
            return Some(vec![item]);
        }
        if let Some(mut path) = find_path(&item.children, key) {
            path.insert(0, item);
            return Some(path);
        }
    }
    None
}

impl NavigationTree {
    /// The flat, permission-filtered menu for one user.
    pub fn items_for_user(&self, user: &dyn UserContext) -> Vec<NavItem> {
        filter_items(user, &self.items)
    }

    /// Filtered top-level items bucketed by group key. Groups with no
    /// surviving items are omitted entirely.
    pub fn grouped_for_user(&self, user: &dyn UserContext) -> BTreeMap<String, Vec<NavItem>> {
        let mut groups: BTreeMap<String, Vec<NavItem>> = BTreeMap::new();
        for item in self.items_for_user(user) {
            groups.entry(item.group.clone()).or_default().push(item);
        }
        groups
    }

    /// The complete group label table. Labels carry no permission gate;
    /// gating happens at item level.
    pub fn group_labels(&self) -> &BTreeMap<String, String> {
        &self.group_labels
    }

    /// Root-to-item ancestor path for a route. Unknown routes and routes the
    /// user cannot see both resolve to an empty path, never an error.
    pub fn breadcrumbs_for_route(&self, user: &dyn UserContext, route: &str) -> Vec<Breadcrumb> {
        let Some(path) = find_path(&self.items, route) else {
            return Vec::new();
        };
        // Access is gated on the target route itself; ancestors are context.
        match path.last() {
            Some(target) if is_visible(user, target) => path
                .iter()
                .map(|item| Breadcrumb {
                    key: item.key.clone(),
                    label: item.label.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// True iff the route exists and the user passes its visibility rule.
    /// Unknown routes are a plain `false`.
    pub fn user_can_access(&self, user: &dyn UserContext, route: &str) -> bool {
        self.find_item(route)
            .map(|item| is_visible(user, item))
            .unwrap_or(false)
    }
}
