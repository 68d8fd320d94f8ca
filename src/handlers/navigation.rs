use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::api::format::{grouped_to_api_value, nav_items_to_api_values, user_summary};
use crate::config;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::navigation;

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    /// Bucket top-level items by group. Defaults to a flat list.
    pub grouped: Option<bool>,
}

/// GET /api/navigation - Permission-filtered menu for the current user
///
/// Returns the flat or grouped navigation tree, the group label table and a
/// minimal summary of the user context the filter ran against.
pub async fn navigation_get(
    Extension(user): Extension<AuthUser>,
    Query(query): Query<NavigationQuery>,
) -> impl IntoResponse {
    let tree = navigation::tree();
    let grouped = query.grouped.unwrap_or(false);

    let menu = if grouped {
        grouped_to_api_value(&tree.grouped_for_user(&user))
    } else {
        Value::Array(nav_items_to_api_values(&tree.items_for_user(&user)))
    };

    Json(json!({
        "success": true,
        "data": {
            "grouped": grouped,
            "navigation": menu,
            "group_labels": tree.group_labels(),
            "user": user_summary(user.is_super_admin, user.permissions.len()),
        }
    }))
}

#[derive(Debug, Deserialize)]
pub struct BreadcrumbQuery {
    /// Route key to resolve; falls back to the configured default route
    pub route: Option<String>,
}

/// GET /api/navigation/breadcrumbs - Root-to-route ancestor path
///
/// Unknown routes and routes the user cannot see resolve to an empty list,
/// never an error.
pub async fn breadcrumbs_get(
    Extension(user): Extension<AuthUser>,
    Query(query): Query<BreadcrumbQuery>,
) -> impl IntoResponse {
    let default_route = config::config().navigation.default_route.as_str();
    let route = query.route.as_deref().unwrap_or(default_route);

    let breadcrumbs = navigation::tree().breadcrumbs_for_route(&user, route);

    Json(json!({
        "success": true,
        "data": {
            "route": route,
            "breadcrumbs": breadcrumbs,
        }
    }))
}

/// POST /api/navigation/can-access - Route-access check for a batch of keys
///
/// Body: `{"routes": ["billing-rates", ...]}`. Responds with a mapping from
/// each requested key to a bool; unknown keys map to false. A body where
/// `routes` is missing, not an array, or contains non-strings is a 400 with
/// no partial processing.
pub async fn can_access_post(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let routes = payload
        .get("routes")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::bad_request("Field 'routes' must be an array of route keys"))?;

    let keys = routes
        .iter()
        .map(|r| r.as_str())
        .collect::<Option<Vec<&str>>>()
        .ok_or_else(|| ApiError::bad_request("Field 'routes' must contain only strings"))?;

    let tree = navigation::tree();
    let mut results = Map::new();
    for key in keys {
        results.insert(key.to_string(), Value::Bool(tree.user_can_access(&user, key)));
    }

    Ok(Json(json!({
        "success": true,
        "data": results,
    })))
}
