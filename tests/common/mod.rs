use anyhow::{Context, Result};

use helpdesk_nav_api::app;

/// Stable user id for the gateway identity headers in tests
pub const USER_ID: &str = "11111111-1111-1111-1111-111111111111";

/// Serve the application router in-process on an ephemeral port and return
/// the base URL. Each test gets its own server; the tree is static so there
/// is no cross-test state.
pub async fn spawn_server() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr().context("failed to read local addr")?;

    tokio::spawn(async move {
        axum::serve(listener, app()).await.expect("test server");
    });

    Ok(format!("http://{}", addr))
}

/// Attach the gateway identity headers the /api routes require
pub fn identify(
    req: reqwest::RequestBuilder,
    permissions: &str,
    super_admin: bool,
) -> reqwest::RequestBuilder {
    req.header("x-auth-user-id", USER_ID)
        .header("x-auth-permissions", permissions)
        .header("x-auth-super-admin", if super_admin { "true" } else { "false" })
}
