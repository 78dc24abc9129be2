//! Advisory edit lock
//!
//! The `Edit Status` column is the only lock the application itself can
//! see. Real enforcement, when enabled, is the protection hook's job; every
//! lock change here is mirrored to it on a best-effort basis.

use crate::adapters::identity::IdentityProvider;
use crate::adapters::protection::{request_protection, request_release, ProtectionHook, ReleaseTarget};
use crate::adapters::row_store::RowStore;
use crate::config::SecretString;
use crate::core::schema::Field;
use crate::core::snapshot::Snapshot;
use crate::domain::{BusinessKey, EditLock, ReqflowError, Requisition, Result};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Reason sent to the protection hook for a manual lock
pub const LOCK_REASON: &str = "locked";

/// Scope of an unlock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockTarget {
    /// The record carrying this business key
    One(String),
    /// Every record currently read-only
    All,
}

/// Sets and clears the edit lock
pub struct LockManager {
    store: Arc<dyn RowStore>,
    identity: Arc<dyn IdentityProvider>,
    protection: Arc<dyn ProtectionHook>,
    admin_account: String,
    max_columns: usize,
}

impl LockManager {
    /// Create a lock manager; unlock credentials are checked against `admin_account`
    pub fn new(
        store: Arc<dyn RowStore>,
        identity: Arc<dyn IdentityProvider>,
        protection: Arc<dyn ProtectionHook>,
        admin_account: impl Into<String>,
        max_columns: usize,
    ) -> Self {
        Self {
            store,
            identity,
            protection,
            admin_account: admin_account.into(),
            max_columns,
        }
    }

    /// Whether the record is read-only; an absent lock counts as editable
    pub fn is_locked(record: &Requisition) -> bool {
        record.is_locked()
    }

    /// Mark one record read-only
    ///
    /// Returns `true` if the record was not read-only before.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no row carries the key and
    /// `StoreUnavailable` if the fetch or the write fails.
    pub async fn lock(&self, business_key: &str) -> Result<bool> {
        let mut snapshot = Snapshot::fetch(self.store.as_ref(), self.max_columns).await?;
        let record = snapshot.require(business_key)?.clone();
        let key = record_key(&record, business_key)?;

        snapshot
            .write_field(
                self.store.as_ref(),
                record.row,
                Field::EditLock,
                EditLock::Readonly.as_str(),
            )
            .await?;
        tracing::info!(business_key = %key, row = record.row, "Record locked");

        request_protection(self.protection.as_ref(), &key, LOCK_REASON).await;
        Ok(!record.is_locked())
    }

    /// Make records editable again
    ///
    /// The credential is checked against the admin account before any
    /// record is touched. Returns the number of records that were read-only
    /// and are now editable.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty credential, an
    /// authentication error for a wrong one, `RecordNotFound` for an
    /// unknown key and `StoreUnavailable` if the store fails.
    pub async fn unlock(&self, target: &UnlockTarget, credential: &SecretString) -> Result<usize> {
        let credential = credential.expose_secret();
        if credential.is_empty() {
            return Err(ReqflowError::Validation(
                "An admin password is required to unlock".to_string(),
            ));
        }
        if !self
            .identity
            .verify_credentials(&self.admin_account, credential)
            .await?
        {
            tracing::warn!(account = %self.admin_account, "Unlock refused: invalid credentials");
            return Err(ReqflowError::Authentication(
                "Invalid admin password".to_string(),
            ));
        }

        let mut snapshot = Snapshot::fetch(self.store.as_ref(), self.max_columns).await?;
        let store = self.store.as_ref();

        match target {
            UnlockTarget::One(business_key) => {
                let record = snapshot.require(business_key)?.clone();
                let key = record_key(&record, business_key)?;
                snapshot
                    .write_field(store, record.row, Field::EditLock, EditLock::Editable.as_str())
                    .await?;
                let changed = usize::from(record.is_locked());
                tracing::info!(business_key = %key, row = record.row, changed, "Record unlocked");

                request_release(
                    self.protection.as_ref(),
                    &ReleaseTarget::Row {
                        business_key: key,
                        row: record.row,
                    },
                )
                .await;
                Ok(changed)
            }
            UnlockTarget::All => {
                let locked: Vec<usize> = snapshot
                    .records()
                    .iter()
                    .filter(|record| record.is_locked())
                    .map(|record| record.row)
                    .collect();

                for row in &locked {
                    snapshot
                        .write_field(store, *row, Field::EditLock, EditLock::Editable.as_str())
                        .await?;
                }
                tracing::info!(count = locked.len(), "Unlocked every read-only record");

                request_release(self.protection.as_ref(), &ReleaseTarget::All).await;
                Ok(locked.len())
            }
        }
    }
}

fn record_key(record: &Requisition, requested: &str) -> Result<BusinessKey> {
    record
        .business_key
        .clone()
        .ok_or_else(|| ReqflowError::RecordNotFound(requested.trim().to_string()))
}
