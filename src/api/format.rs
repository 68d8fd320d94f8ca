use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::navigation::NavItem;

/// Convert a navigation item into the public wire format
/// { key, label, icon, group, order, children }
pub fn nav_item_to_api_value(item: &NavItem) -> Value {
    json!({
        "key": item.key,
        "label": item.label,
        "icon": item.icon,
        "group": item.group,
        "order": item.order,
        "children": nav_items_to_api_values(&item.children),
    })
}

/// Convert a list of navigation items to API values
pub fn nav_items_to_api_values(items: &[NavItem]) -> Vec<Value> {
    items.iter().map(nav_item_to_api_value).collect()
}

/// Convert a grouped navigation mapping into a JSON object keyed by group
pub fn grouped_to_api_value(groups: &BTreeMap<String, Vec<NavItem>>) -> Value {
    let mut obj = Map::new();
    for (group, items) in groups {
        obj.insert(
            group.clone(),
            Value::Array(nav_items_to_api_values(items)),
        );
    }
    Value::Object(obj)
}

/// Minimal user-context summary attached to navigation responses
pub fn user_summary(is_super_admin: bool, permission_count: usize) -> Value {
    json!({
        "is_super_admin": is_super_admin,
        "permission_count": permission_count,
    })
}
