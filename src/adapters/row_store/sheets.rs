//! Spreadsheet values API client
//!
//! Talks to a `/v4/spreadsheets/{id}/values` REST endpoint with a bearer
//! token. This is the only place in the crate that retries: transient
//! failures (connection errors, timeouts, 429 and 5xx) are retried with
//! exponential backoff per `store.retry`.

use super::traits::RowStore;
use crate::config::{RetryConfig, StoreConfig};
use crate::domain::{ReqflowError, Result, RowStoreError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// [`RowStore`] over the spreadsheet values API
pub struct SheetsRowStore {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    sheet_name: String,
    access_token: crate::config::SecretString,
    retry: RetryConfig,
}

/// Body of a values read
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl SheetsRowStore {
    /// Create a client for one sheet of the configured spreadsheet
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &StoreConfig, sheet_name: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            RowStoreError::ConnectionFailed(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)))
            .build()
            .map_err(|e| {
                RowStoreError::ConnectionFailed(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: config.spreadsheet_id.clone(),
            sheet_name: sheet_name.into(),
            access_token: config.access_token.clone(),
            retry: config.retry.clone(),
        })
    }

    /// URL of a values range, optionally with a `:verb` suffix
    fn values_url(&self, range: &str, verb: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        let last = match verb {
            Some(verb) => format!("{range}:{verb}"),
            None => range.to_string(),
        };
        url.path_segments_mut()
            .map_err(|_| {
                RowStoreError::ConnectionFailed(format!(
                    "Base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", &self.spreadsheet_id, "values", &last]);
        Ok(url)
    }

    fn token(&self) -> &str {
        self.access_token.expose_secret().as_ref()
    }

    fn sheet_range(&self, cells: Option<&str>) -> String {
        let quoted = format!("'{}'", self.sheet_name.replace('\'', "''"));
        match cells {
            Some(cells) => format!("{quoted}!{cells}"),
            None => quoted,
        }
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, RowStoreError>>,
    {
        let max_retries = self.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries || !e.is_transient() {
                        return Err(ReqflowError::StoreUnavailable(e));
                    }

                    let factor = self.retry.backoff_multiplier.powi(attempt as i32 - 1);
                    let delay_ms = ((self.retry.initial_delay_ms as f64) * factor) as u64;
                    let delay_ms = delay_ms.min(self.retry.max_delay_ms);

                    crate::log_retry_attempt!(attempt, max_retries, e);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(range, None)?;

        let body = self
            .retry_request(|| async {
                let resp = self
                    .client
                    .get(url.clone())
                    .bearer_auth(self.token())
                    .send()
                    .await
                    .map_err(map_transport_error)?;
                let resp = check_status(resp, &self.sheet_name).await?;
                resp.json::<ValueRange>()
                    .await
                    .map_err(|e| RowStoreError::InvalidResponse(e.to_string()))
            })
            .await?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}

#[async_trait]
impl RowStore for SheetsRowStore {
    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    async fn fetch_header(&self) -> Result<Vec<String>> {
        let range = self.sheet_range(Some("1:1"));
        let mut rows = self.get_values(&range).await?;
        Ok(if rows.is_empty() {
            Vec::new()
        } else {
            rows.swap_remove(0)
        })
    }

    async fn fetch_all_rows(&self) -> Result<Vec<Vec<String>>> {
        let range = self.sheet_range(None);
        let rows = self.get_values(&range).await?;
        Ok(rows.into_iter().skip(1).collect())
    }

    async fn append_row(&self, row: Vec<String>) -> Result<()> {
        let range = self.sheet_range(Some("A1"));
        let mut url = self.values_url(&range, Some("append"))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");
        let body = serde_json::json!({ "values": [row] });

        self.retry_request(|| async {
            let resp = self
                .client
                .post(url.clone())
                .bearer_auth(self.token())
                .json(&body)
                .send()
                .await
                .map_err(map_transport_error)?;
            check_status(resp, &self.sheet_name).await.map(|_| ())
        })
        .await?;

        tracing::debug!(sheet = %self.sheet_name, "Appended row");
        Ok(())
    }

    async fn update_cell(&self, row: usize, column: usize, value: &str) -> Result<()> {
        let a1 = a1_cell(row, column).ok_or_else(|| RowStoreError::RequestFailed {
            status: 400,
            message: format!("invalid cell coordinates ({row}, {column})"),
        })?;
        let range = self.sheet_range(Some(&a1));
        let mut url = self.values_url(&range, None)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = serde_json::json!({ "range": range, "values": [[value]] });

        self.retry_request(|| async {
            let resp = self
                .client
                .put(url.clone())
                .bearer_auth(self.token())
                .json(&body)
                .send()
                .await
                .map_err(map_transport_error)?;
            check_status(resp, &self.sheet_name).await.map(|_| ())
        })
        .await?;

        tracing::debug!(sheet = %self.sheet_name, cell = %a1, "Updated cell");
        Ok(())
    }
}

fn map_transport_error(e: reqwest::Error) -> RowStoreError {
    if e.is_timeout() {
        RowStoreError::Timeout(e.to_string())
    } else {
        RowStoreError::ConnectionFailed(e.to_string())
    }
}

async fn check_status(
    resp: reqwest::Response,
    sheet: &str,
) -> std::result::Result<reqwest::Response, RowStoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            RowStoreError::AuthenticationFailed(format!("status {status}: {body}"))
        }
        StatusCode::NOT_FOUND => RowStoreError::SheetNotFound(sheet.to_string()),
        StatusCode::BAD_REQUEST if body.contains("Unable to parse range") => {
            RowStoreError::SheetNotFound(sheet.to_string())
        }
        _ => RowStoreError::RequestFailed {
            status: status.as_u16(),
            message: body,
        },
    })
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Column letters for a 1-based column (`1 -> A`, `27 -> AA`)
pub fn column_letters(column: usize) -> Option<String> {
    if column == 0 {
        return None;
    }
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).ok()
}

/// A1 reference for 1-based coordinates
pub fn a1_cell(row: usize, column: usize) -> Option<String> {
    if row == 0 {
        return None;
    }
    column_letters(column).map(|letters| format!("{letters}{row}"))
}
