use helpdesk_nav_api::{app, config, navigation};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up APP_ENV, NAV_DEFINITION_PATH, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Helpdesk Nav API in {:?} mode", config.environment);

    // Force the navigation definition to load now so a broken file fails the
    // process at startup, not on the first request.
    let tree = navigation::tree();
    tracing::info!(
        "Navigation definition loaded: {} items across {} groups",
        tree.item_count(),
        tree.group_labels().len()
    );

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("HELPDESK_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Helpdesk Nav API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
