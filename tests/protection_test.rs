//! Integration tests for the external row protection hook

use mockito::Matcher;
use reqflow::adapters::protection::{
    request_protection, request_release, AppsScriptProtection, ProtectionHook, ReleaseTarget,
};
use reqflow::config::{secret_string, ProtectionConfig};
use reqflow::domain::BusinessKey;

fn config(url: String) -> ProtectionConfig {
    ProtectionConfig {
        enabled: true,
        web_app_url: Some(url),
        admin_password: Some(secret_string("pw".to_string())),
        timeout_seconds: 5,
    }
}

#[tokio::test]
async fn test_protect_posts_purchase_number() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/exec")
        .match_body(Matcher::Json(serde_json::json!({
            "action": "protectByPurchaseNo",
            "purchaseNo": "20250718-001",
            "reason": "receipt approval completed",
            "password": "pw"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"message":"protected"}"#)
        .create_async()
        .await;

    let hook = AppsScriptProtection::new(&config(format!("{}/exec", server.url()))).unwrap();
    let key = BusinessKey::new("20250718-001").unwrap();

    assert!(request_protection(&hook, &key, "receipt approval completed").await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_release_row_and_all() {
    let mut server = mockito::Server::new_async().await;
    let row = server
        .mock("POST", "/exec")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "action": "removeProtection",
            "rowNumber": 4
        })))
        .with_status(200)
        .with_body(r#"{"success":true,"message":""}"#)
        .create_async()
        .await;
    let all = server
        .mock("POST", "/exec")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "action": "removeAllProtections"
        })))
        .with_status(200)
        .with_body(r#"{"success":true,"message":""}"#)
        .create_async()
        .await;

    let hook = AppsScriptProtection::new(&config(format!("{}/exec", server.url()))).unwrap();
    let target = ReleaseTarget::Row {
        business_key: BusinessKey::new("20250718-003").unwrap(),
        row: 4,
    };
    hook.release(&target).await.unwrap();
    hook.release(&ReleaseTarget::All).await.unwrap();

    row.assert_async().await;
    all.assert_async().await;
}

#[tokio::test]
async fn test_failures_are_swallowed() {
    let mut server = mockito::Server::new_async().await;
    let _refused = server
        .mock("POST", "/exec")
        .with_status(200)
        .with_body(r#"{"success":false,"message":"wrong password"}"#)
        .create_async()
        .await;

    let hook = AppsScriptProtection::new(&config(format!("{}/exec", server.url()))).unwrap();
    let key = BusinessKey::new("20250718-001").unwrap();

    assert!(hook.protect(&key, "locked").await.is_err());
    assert!(!request_protection(&hook, &key, "locked").await);
    assert!(!request_release(&hook, &ReleaseTarget::All).await);
}

#[tokio::test]
async fn test_unreachable_hook_is_swallowed() {
    let hook = AppsScriptProtection::new(&config("http://127.0.0.1:9/exec".to_string())).unwrap();
    let key = BusinessKey::new("20250718-001").unwrap();
    assert!(!request_protection(&hook, &key, "locked").await);
}
