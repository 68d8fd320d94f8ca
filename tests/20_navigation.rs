mod common;

use anyhow::Result;
use reqwest::StatusCode;

// These tests drive GET /api/navigation against the built-in helpdesk menu.

fn top_level_keys(payload: &serde_json::Value) -> Vec<String> {
    payload["data"]["navigation"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|i| i["key"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn flat_navigation_filters_by_permission() -> Result<()> {
    let base_url = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = common::identify(
        client.get(format!("{}/api/navigation", base_url)),
        "billing.manage",
        false,
    )
    .send()
    .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<serde_json::Value>().await?;
    assert!(payload["success"].as_bool().unwrap_or(false), "success=false: {}", payload);
    assert_eq!(payload["data"]["grouped"], false);

    let keys = top_level_keys(&payload);
    assert!(keys.contains(&"dashboard".to_string()), "missing dashboard: {:?}", keys);
    assert!(keys.contains(&"billing-rates".to_string()), "missing billing-rates: {:?}", keys);
    assert!(!keys.contains(&"users".to_string()), "users leaked: {:?}", keys);
    assert!(!keys.contains(&"settings".to_string()), "settings leaked: {:?}", keys);

    // Minimal user-context summary rides along
    assert_eq!(payload["data"]["user"]["is_super_admin"], false);
    assert_eq!(payload["data"]["user"]["permission_count"], 1);

    Ok(())
}

#[tokio::test]
async fn unrelated_permission_hides_billing() -> Result<()> {
    let base_url = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = common::identify(
        client.get(format!("{}/api/navigation", base_url)),
        "time.manage",
        false,
    )
    .send()
    .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<serde_json::Value>().await?;
    let keys = top_level_keys(&payload);
    assert!(!keys.contains(&"billing-rates".to_string()), "billing-rates leaked: {:?}", keys);

    Ok(())
}

#[tokio::test]
async fn grouped_navigation_omits_empty_groups() -> Result<()> {
    let base_url = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = common::identify(
        client.get(format!("{}/api/navigation?grouped=true", base_url)),
        "billing.manage",
        false,
    )
    .send()
    .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["data"]["grouped"], true);

    let groups = payload["data"]["navigation"].as_object().cloned().unwrap_or_default();
    assert!(groups.contains_key("general"), "missing general: {:?}", groups.keys());
    assert!(groups.contains_key("finance"), "missing finance: {:?}", groups.keys());
    assert!(!groups.contains_key("admin"), "empty admin group surfaced");
    assert!(!groups.contains_key("manage"), "empty manage group surfaced");

    for (group, items) in &groups {
        let items = items.as_array().cloned().unwrap_or_default();
        assert!(!items.is_empty(), "group '{}' surfaced empty", group);
    }

    let finance_keys: Vec<&str> = groups["finance"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["key"].as_str().unwrap_or_default())
        .collect();
    assert!(finance_keys.contains(&"billing-rates"));

    // The label table is the complete static mapping, user-independent
    let labels = payload["data"]["group_labels"].as_object().cloned().unwrap_or_default();
    assert_eq!(labels.get("admin").and_then(|v| v.as_str()), Some("Administration"));

    Ok(())
}

#[tokio::test]
async fn super_admin_sees_all_items() -> Result<()> {
    let base_url = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = common::identify(
        client.get(format!("{}/api/navigation", base_url)),
        "",
        true,
    )
    .send()
    .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<serde_json::Value>().await?;
    let keys = top_level_keys(&payload);
    for expected in ["dashboard", "tickets", "customers", "import-templates", "billing-rates", "reports", "users", "settings"] {
        assert!(keys.contains(&expected.to_string()), "missing {}: {:?}", expected, keys);
    }
    assert_eq!(payload["data"]["user"]["is_super_admin"], true);

    Ok(())
}

#[tokio::test]
async fn missing_identity_headers_are_rejected() -> Result<()> {
    let base_url = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/navigation", base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["code"], "UNAUTHORIZED");

    Ok(())
}
