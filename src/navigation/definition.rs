use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::config;

/// One entry in the navigation menu. Visibility is gated per item: an empty
/// `permissions` list means public, otherwise holding any one of the listed
/// permissions is enough. Children carry their own gates and inherit nothing
/// from the parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    /// Unique route identifier across the whole tree
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Category bucket for top-level grouping
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default)]
    pub children: Vec<NavItem>,
    /// Sort weight, ascending; definition order breaks ties
    #[serde(default)]
    pub order: i32,
}

fn default_group() -> String {
    "general".to_string()
}

/// The complete navigation definition: top-level items plus the group label
/// table. Immutable once loaded; the process-wide instance lives behind
/// [`tree`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationTree {
    pub items: Vec<NavItem>,
    #[serde(default)]
    pub group_labels: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("duplicate navigation key '{0}'")]
    DuplicateKey(String),
    #[error("failed to read navigation definition '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse navigation definition '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl NavigationTree {
    /// Load a definition from a YAML file and validate it.
    pub fn load(path: &str) -> Result<Self, NavError> {
        let raw = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_string(),
            source,
        })?;
        let tree: NavigationTree =
            serde_yaml::from_str(&raw).map_err(|source| NavError::Parse {
                path: path.to_string(),
                source,
            })?;
        tree.validate()?;
        Ok(tree)
    }

    /// Every key must be unique across the whole tree, children included.
    pub fn validate(&self) -> Result<(), NavError> {
        fn walk<'a>(items: &'a [NavItem], seen: &mut HashSet<&'a str>) -> Result<(), NavError> {
            for item in items {
                if !seen.insert(item.key.as_str()) {
                    return Err(NavError::DuplicateKey(item.key.clone()));
                }
                walk(&item.children, seen)?;
            }
            Ok(())
        }
        let mut seen = HashSet::new();
        walk(&self.items, &mut seen)
    }

    /// Recursive lookup by route key.
    pub fn find_item(&self, key: &str) -> Option<&NavItem> {
        fn find<'a>(items: &'a [NavItem], key: &str) -> Option<&'a NavItem> {
            for item in items {
                if item.key == key {
                    return Some(item);
                }
                if let Some(found) = find(&item.children, key) {
                    return Some(found);
                }
            }
            None
        }
        find(&self.items, key)
    }

    /// Total number of items in the tree, children included.
    pub fn item_count(&self) -> usize {
        fn count(items: &[NavItem]) -> usize {
            items.iter().map(|i| 1 + count(&i.children)).sum()
        }
        count(&self.items)
    }

    /// The built-in helpdesk menu, used when no definition file is configured.
    pub fn builtin() -> Self {
        fn item(
            key: &str,
            label: &str,
            icon: &str,
            permissions: &[&str],
            group: &str,
            order: i32,
        ) -> NavItem {
            NavItem {
                key: key.to_string(),
                label: label.to_string(),
                icon: Some(icon.to_string()),
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
                group: group.to_string(),
                children: Vec::new(),
                order,
            }
        }

        let mut tickets = item(
            "tickets",
            "Tickets",
            "ticket",
            &["tickets.view", "tickets.manage"],
            "general",
            2,
        );
        tickets.children = vec![
            item(
                "tickets-open",
                "Open Tickets",
                "inbox",
                &["tickets.view", "tickets.manage"],
                "general",
                1,
            ),
            item(
                "tickets-unassigned",
                "Unassigned",
                "inbox-x",
                &["tickets.manage"],
                "general",
                2,
            ),
            item(
                "tickets-closed",
                "Closed Tickets",
                "archive",
                &["tickets.view", "tickets.manage"],
                "general",
                3,
            ),
        ];

        let mut reports = item(
            "reports",
            "Reports",
            "bar-chart",
            &["reports.view"],
            "finance",
            2,
        );
        reports.children = vec![
            item(
                "reports-time",
                "Time Reports",
                "clock",
                &["reports.view"],
                "finance",
                1,
            ),
            item(
                "reports-billing",
                "Billing Reports",
                "file-text",
                &["billing.manage"],
                "finance",
                2,
            ),
        ];

        let items = vec![
            item("dashboard", "Dashboard", "home", &[], "general", 1),
            tickets,
            item(
                "customers",
                "Customers",
                "users",
                &["customers.view", "customers.manage"],
                "manage",
                1,
            ),
            item(
                "import-templates",
                "Import Templates",
                "upload",
                &["import.manage"],
                "manage",
                2,
            ),
            item(
                "billing-rates",
                "Billing Rates",
                "credit-card",
                &["billing.manage"],
                "finance",
                1,
            ),
            reports,
            item("users", "Users", "user-cog", &["users.manage"], "admin", 1),
            item(
                "settings",
                "Settings",
                "settings",
                &["settings.manage"],
                "admin",
                2,
            ),
        ];

        let mut group_labels = BTreeMap::new();
        group_labels.insert("general".to_string(), "General".to_string());
        group_labels.insert("manage".to_string(), "Management".to_string());
        group_labels.insert("finance".to_string(), "Finance".to_string());
        group_labels.insert("admin".to_string(), "Administration".to_string());

        NavigationTree { items, group_labels }
    }
}

// Process-wide navigation definition, loaded once at startup. A broken
// definition file must fail the process here rather than surface later, so
// the Lazy init panics on load errors.
pub static NAVIGATION: Lazy<NavigationTree> = Lazy::new(|| {
    match config::config().navigation.definition_path.as_deref() {
        Some(path) => {
            tracing::info!("Loading navigation definition from {}", path);
            NavigationTree::load(path)
                .unwrap_or_else(|e| panic!("invalid navigation definition: {}", e))
        }
        None => NavigationTree::builtin(),
    }
});

/// Accessor for the process-wide navigation tree.
pub fn tree() -> &'static NavigationTree {
    &NAVIGATION
}
