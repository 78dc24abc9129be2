//! Integration tests for the spreadsheet row store client

use mockito::Matcher;
use reqflow::adapters::row_store::{RowStore, SheetsRowStore};
use reqflow::config::{secret_string, RetryConfig, StoreConfig};
use reqflow::domain::{ReqflowError, RowStoreError};

fn config(base_url: String) -> StoreConfig {
    StoreConfig {
        base_url,
        spreadsheet_id: "sheet-123".to_string(),
        requisition_sheet: "requisitions".to_string(),
        user_sheet: "users".to_string(),
        access_token: secret_string("token".to_string()),
        timeout_seconds: 5,
        retry: RetryConfig {
            max_retries: 2,
            initial_delay_ms: 1,
            max_delay_ms: 2,
            backoff_multiplier: 2.0,
        },
    }
}

#[tokio::test]
async fn test_fetch_header_and_rows() {
    let mut server = mockito::Server::new_async().await;
    let header = server
        .mock(
            "GET",
            Matcher::Regex(r"/v4/spreadsheets/sheet-123/values/'requisitions'!1:1".to_string()),
        )
        .match_header("authorization", "Bearer token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"range":"requisitions!A1:C1","values":[["Requisition No","Item","Quantity"]]}"#)
        .create_async()
        .await;
    let rows = server
        .mock(
            "GET",
            Matcher::Regex(r"/v4/spreadsheets/sheet-123/values/'requisitions'$".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"values":[["Requisition No","Item","Quantity"],["20250718-001","Gloves",3],["20250718-002"]]}"#,
        )
        .create_async()
        .await;

    let store = SheetsRowStore::new(&config(server.url()), "requisitions").unwrap();

    let fetched_header = store.fetch_header().await.unwrap();
    assert_eq!(fetched_header, vec!["Requisition No", "Item", "Quantity"]);

    let fetched_rows = store.fetch_all_rows().await.unwrap();
    assert_eq!(fetched_rows.len(), 2);
    assert_eq!(fetched_rows[0], vec!["20250718-001", "Gloves", "3"]);
    assert_eq!(fetched_rows[1], vec!["20250718-002"]);

    header.assert_async().await;
    rows.assert_async().await;
}

#[tokio::test]
async fn test_empty_sheet_has_empty_header() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"!1:1".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"range":"requisitions!A1:Z1"}"#)
        .create_async()
        .await;

    let store = SheetsRowStore::new(&config(server.url()), "requisitions").unwrap();
    assert!(store.fetch_header().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_cell_puts_single_value() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", Matcher::Regex(r"'requisitions'!C5".to_string()))
        .match_body(Matcher::PartialJson(serde_json::json!({
            "values": [["approved"]]
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let store = SheetsRowStore::new(&config(server.url()), "requisitions").unwrap();
    store.update_cell(5, 3, "approved").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_append_row_posts_values() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r":append".to_string()))
        .match_body(Matcher::Json(serde_json::json!({
            "values": [["20250718-003", "Tape"]]
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let store = SheetsRowStore::new(&config(server.url()), "requisitions").unwrap();
    store
        .append_row(vec!["20250718-003".to_string(), "Tape".to_string()])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .with_status(503)
        .with_body("backend unavailable")
        .expect(2)
        .create_async()
        .await;

    let store = SheetsRowStore::new(&config(server.url()), "requisitions").unwrap();
    let err = store.fetch_header().await.unwrap_err();

    assert!(matches!(
        err,
        ReqflowError::StoreUnavailable(RowStoreError::RequestFailed { status: 503, .. })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_failure_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .with_status(401)
        .with_body("invalid credentials")
        .expect(1)
        .create_async()
        .await;

    let store = SheetsRowStore::new(&config(server.url()), "requisitions").unwrap();
    let err = store.fetch_all_rows().await.unwrap_err();

    assert!(matches!(
        err,
        ReqflowError::StoreUnavailable(RowStoreError::AuthenticationFailed(_))
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_sheet() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":{"message":"Unable to parse range: 'missing'!1:1"}}"#)
        .create_async()
        .await;

    let store = SheetsRowStore::new(&config(server.url()), "missing").unwrap();
    let err = store.fetch_header().await.unwrap_err();
    assert!(matches!(
        err,
        ReqflowError::StoreUnavailable(RowStoreError::SheetNotFound(_))
    ));
}
