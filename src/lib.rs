use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod navigation;

/// Build the full application router. Shared between the server binary and
/// the integration tests, which serve it in-process.
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected API (identity headers required)
        .merge(navigation_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn navigation_routes() -> Router {
    use axum::routing::post;
    use handlers::navigation;

    Router::new()
        .route("/api/navigation", get(navigation::navigation_get))
        .route("/api/navigation/breadcrumbs", get(navigation::breadcrumbs_get))
        .route("/api/navigation/can-access", post(navigation::can_access_post))
        .layer(axum::middleware::from_fn(middleware::identity_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Helpdesk Nav API",
            "version": version,
            "description": "Permission-aware navigation, breadcrumbs and route access for the helpdesk backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "navigation": "GET /api/navigation?grouped=<bool> (protected)",
                "breadcrumbs": "GET /api/navigation/breadcrumbs?route=<key> (protected)",
                "can_access": "POST /api/navigation/can-access (protected)",
            }
        }
    }))
}

async fn health() -> Json<Value> {
    let now = chrono::Utc::now();
    let tree = navigation::tree();

    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now,
            "navigation_items": tree.item_count(),
            "navigation_groups": tree.group_labels().len(),
        }
    }))
}
