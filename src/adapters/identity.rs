//! Identity and attribution
//!
//! Accounts live in their own sheet (Account, Password, Name, Mail, Role).
//! Workflow operations only need a display name to stamp into actor
//! columns; a missing or unreadable account yields empty attribution and
//! never blocks the operation.

use crate::adapters::row_store::RowStore;
use crate::config::SecretValue;
use crate::core::schema::ColumnMap;
use crate::domain::{Result, UserInfo};
use async_trait::async_trait;
use std::sync::Arc;

const ACCOUNT: &[&str] = &["Account", "Username", "account"];
const PASSWORD: &[&str] = &["Password", "password"];
const NAME: &[&str] = &["Name", "Display Name", "name"];
const MAIL: &[&str] = &["Mail", "Email", "mail"];
const ROLE: &[&str] = &["Role", "role"];

/// Source of user attribution and credential checks
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up an account
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the account source cannot be read.
    async fn lookup(&self, account: &str) -> Result<Option<UserInfo>>;

    /// Check an account's password
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the account source cannot be read.
    async fn verify_credentials(&self, account: &str, password: &SecretValue) -> Result<bool>;
}

/// Attribution for `account`, empty when it cannot be resolved
pub async fn attribution(provider: &dyn IdentityProvider, account: &str) -> UserInfo {
    match provider.lookup(account).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(account, "Unknown account, using empty attribution");
            UserInfo::anonymous(account)
        }
        Err(e) => {
            tracing::warn!(account, error = %e, "Account lookup failed, using empty attribution");
            UserInfo::anonymous(account)
        }
    }
}

/// [`IdentityProvider`] over the user-account sheet
pub struct SheetIdentityProvider {
    store: Arc<dyn RowStore>,
}

struct AccountRow {
    user: UserInfo,
    password: String,
}

impl SheetIdentityProvider {
    /// Create a provider reading `store`
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    async fn find(&self, account: &str) -> Result<Option<AccountRow>> {
        let account = account.trim();
        if account.is_empty() {
            return Ok(None);
        }

        let header = self.store.fetch_header().await?;
        let columns = ColumnMap::resolve(&header);
        let rows = self.store.fetch_all_rows().await?;

        let text = |row: &[String], names: &[&str]| {
            columns
                .value_by_names(row, names)
                .unwrap_or_default()
                .to_string()
        };

        Ok(rows
            .iter()
            .find(|row| columns.value_by_names(row, ACCOUNT) == Some(account))
            .map(|row| {
                let row = row.as_slice();
                AccountRow {
                    user: UserInfo {
                        account: account.to_string(),
                        name: text(row, NAME),
                        mail: text(row, MAIL),
                        role: text(row, ROLE),
                    },
                    password: text(row, PASSWORD),
                }
            }))
    }
}

#[async_trait]
impl IdentityProvider for SheetIdentityProvider {
    async fn lookup(&self, account: &str) -> Result<Option<UserInfo>> {
        Ok(self.find(account).await?.map(|row| row.user))
    }

    async fn verify_credentials(&self, account: &str, password: &SecretValue) -> Result<bool> {
        Ok(self
            .find(account)
            .await?
            .is_some_and(|row| !row.password.is_empty() && password.matches(&row.password)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::row_store::InMemoryRowStore;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn provider() -> SheetIdentityProvider {
        let store = InMemoryRowStore::with_rows(
            "users",
            strings(&["Account", "Password", "Name", "Mail", "Role"]),
            vec![
                strings(&["admin", "s3cret", "Administrator", "admin@example.com", "manager"]),
                strings(&["lin", "", "Lin Chen", "lin@example.com", "staff"]),
            ],
        );
        SheetIdentityProvider::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_lookup_known_account() {
        let user = provider().lookup("lin").await.unwrap().unwrap();
        assert_eq!(user.name, "Lin Chen");
        assert_eq!(user.role, "staff");
    }

    #[tokio::test]
    async fn test_attribution_falls_back_to_empty() {
        let user = attribution(&provider(), "ghost").await;
        assert_eq!(user.account, "ghost");
        assert!(!user.is_resolved());
        assert!(user.mail.is_empty());
    }

    #[tokio::test]
    async fn test_attribution_survives_store_failure() {
        let store = InMemoryRowStore::new("users", strings(&["Account"]));
        store.set_unavailable(true);
        let provider = SheetIdentityProvider::new(Arc::new(store));
        let user = attribution(&provider, "lin").await;
        assert!(!user.is_resolved());
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let provider = provider();
        let good = SecretValue::from("s3cret".to_string());
        let bad = SecretValue::from("guess".to_string());
        let empty = SecretValue::from(String::new());

        assert!(provider.verify_credentials("admin", &good).await.unwrap());
        assert!(!provider.verify_credentials("admin", &bad).await.unwrap());
        assert!(!provider.verify_credentials("lin", &empty).await.unwrap());
        assert!(!provider.verify_credentials("ghost", &good).await.unwrap());
    }
}
