//! External protection hook
//!
//! The edit lock column is advisory. When enabled, terminal decisions also
//! ask an external web app to protect the record's row in the sheet itself.
//! Hook failures never reach the caller of a workflow operation: the
//! `request_*` helpers log and swallow them.

use crate::config::{ProtectionConfig, SecretString};
use crate::domain::{BusinessKey, ReqflowError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a release request covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// One record at a known sheet row
    Row {
        /// Record key, for logging
        business_key: BusinessKey,
        /// 1-based sheet row
        row: usize,
    },
    /// Every protected range
    All,
}

/// Collaborator enforcing read-only rows outside the application
#[async_trait]
pub trait ProtectionHook: Send + Sync {
    /// Whether requests are forwarded anywhere
    fn is_enabled(&self) -> bool;

    /// Request protection of the record's row
    async fn protect(&self, business_key: &BusinessKey, reason: &str) -> Result<()>;

    /// Request removal of protection
    async fn release(&self, target: &ReleaseTarget) -> Result<()>;
}

/// Hook used when `protection.enabled = false`
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledProtection;

#[async_trait]
impl ProtectionHook for DisabledProtection {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn protect(&self, _business_key: &BusinessKey, _reason: &str) -> Result<()> {
        Ok(())
    }

    async fn release(&self, _target: &ReleaseTarget) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum ProtectionRequest<'a> {
    #[serde(rename = "protectByPurchaseNo", rename_all = "camelCase")]
    Protect {
        purchase_no: &'a str,
        reason: &'a str,
        password: &'a str,
    },
    #[serde(rename = "removeProtection", rename_all = "camelCase")]
    Remove { row_number: usize, password: &'a str },
    #[serde(rename = "removeAllProtections")]
    RemoveAll { password: &'a str },
}

#[derive(Debug, Deserialize)]
struct ProtectionResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
}

/// Protection through a script web app answering `{success, message}`
pub struct AppsScriptProtection {
    client: Client,
    web_app_url: String,
    password: SecretString,
}

impl AppsScriptProtection {
    /// Create the hook from an enabled protection section
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL or password is missing, or
    /// if the HTTP client cannot be built.
    pub fn new(config: &ProtectionConfig) -> Result<Self> {
        let web_app_url = config
            .web_app_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                ReqflowError::Configuration("protection.web_app_url not provided".to_string())
            })?;
        let password = config.admin_password.clone().ok_or_else(|| {
            ReqflowError::Configuration("protection.admin_password not provided".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ReqflowError::Protection(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            web_app_url,
            password,
        })
    }

    async fn send(&self, request: &ProtectionRequest<'_>) -> Result<()> {
        let resp = self
            .client
            .post(&self.web_app_url)
            .json(request)
            .send()
            .await
            .map_err(|e| ReqflowError::Protection(format!("Request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ReqflowError::Protection(format!(
                "Web app answered {status}: {body}"
            )));
        }

        let answer: ProtectionResponse = resp
            .json()
            .await
            .map_err(|e| ReqflowError::Protection(format!("Unreadable response: {e}")))?;

        if !answer.success {
            return Err(ReqflowError::Protection(answer.message));
        }
        Ok(())
    }
}

#[async_trait]
impl ProtectionHook for AppsScriptProtection {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn protect(&self, business_key: &BusinessKey, reason: &str) -> Result<()> {
        self.send(&ProtectionRequest::Protect {
            purchase_no: business_key.as_str(),
            reason,
            password: self.password.expose_secret().as_ref(),
        })
        .await
    }

    async fn release(&self, target: &ReleaseTarget) -> Result<()> {
        let password: &str = self.password.expose_secret().as_ref();
        let request = match target {
            ReleaseTarget::Row { row, .. } => ProtectionRequest::Remove {
                row_number: *row,
                password,
            },
            ReleaseTarget::All => ProtectionRequest::RemoveAll { password },
        };
        self.send(&request).await
    }
}

/// Ask for protection; failures are logged, never returned
///
/// Returns whether the hook accepted the request.
pub async fn request_protection(
    hook: &dyn ProtectionHook,
    business_key: &BusinessKey,
    reason: &str,
) -> bool {
    if !hook.is_enabled() {
        return false;
    }
    match hook.protect(business_key, reason).await {
        Ok(()) => {
            tracing::info!(business_key = %business_key, reason, "Row protection applied");
            true
        }
        Err(e) => {
            tracing::warn!(
                business_key = %business_key,
                error = %e,
                "Row protection failed; edit lock remains advisory"
            );
            false
        }
    }
}

/// Ask for release; failures are logged, never returned
pub async fn request_release(hook: &dyn ProtectionHook, target: &ReleaseTarget) -> bool {
    if !hook.is_enabled() {
        return false;
    }
    match hook.release(target).await {
        Ok(()) => {
            tracing::info!(release = ?target, "Row protection released");
            true
        }
        Err(e) => {
            tracing::warn!(release = ?target, error = %e, "Releasing row protection failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_request_shape() {
        let request = ProtectionRequest::Protect {
            purchase_no: "20250718-001",
            reason: "receipt approved",
            password: "pw",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "protectByPurchaseNo",
                "purchaseNo": "20250718-001",
                "reason": "receipt approved",
                "password": "pw"
            })
        );
    }

    #[test]
    fn test_release_request_shapes() {
        let json = serde_json::to_value(ProtectionRequest::Remove {
            row_number: 7,
            password: "pw",
        })
        .unwrap();
        assert_eq!(json["action"], "removeProtection");
        assert_eq!(json["rowNumber"], 7);

        let json = serde_json::to_value(ProtectionRequest::RemoveAll { password: "pw" }).unwrap();
        assert_eq!(json["action"], "removeAllProtections");
    }

    #[tokio::test]
    async fn test_disabled_hook_is_silent() {
        let key = BusinessKey::new("20250718-001").unwrap();
        assert!(!request_protection(&DisabledProtection, &key, "reason").await);
        assert!(!request_release(&DisabledProtection, &ReleaseTarget::All).await);
    }

    #[test]
    fn test_new_requires_url_and_password() {
        let config = ProtectionConfig {
            enabled: true,
            ..ProtectionConfig::default()
        };
        assert!(AppsScriptProtection::new(&config).is_err());
    }
}
