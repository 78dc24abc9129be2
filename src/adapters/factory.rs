//! Adapter factory
//!
//! Builds the collaborators a command needs from configuration. Every
//! collaborator comes back as an `Arc<dyn Trait>` so core services stay
//! independent of the concrete clients.

use crate::adapters::attachment::{AttachmentStore, DirectoryAttachmentStore};
use crate::adapters::identity::{IdentityProvider, SheetIdentityProvider};
use crate::adapters::protection::{AppsScriptProtection, DisabledProtection, ProtectionHook};
use crate::adapters::row_store::{RowStore, SheetsRowStore};
use crate::config::{AttachmentConfig, ProtectionConfig, ReqflowConfig, StoreConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create a row store client for one sheet of the configured spreadsheet
///
/// # Errors
///
/// Returns `StoreUnavailable` if the client cannot be built.
pub fn create_row_store(config: &StoreConfig, sheet_name: &str) -> Result<Arc<dyn RowStore>> {
    tracing::debug!(sheet = sheet_name, "Creating row store client");
    let store = SheetsRowStore::new(config, sheet_name)?;
    Ok(Arc::new(store) as Arc<dyn RowStore>)
}

/// Create the protection hook, or a disabled one when protection is off
///
/// # Errors
///
/// Returns a configuration error if protection is enabled but incomplete.
pub fn create_protection_hook(config: &ProtectionConfig) -> Result<Arc<dyn ProtectionHook>> {
    if !config.enabled {
        return Ok(Arc::new(DisabledProtection) as Arc<dyn ProtectionHook>);
    }
    tracing::info!("Creating row protection hook");
    let hook = AppsScriptProtection::new(config)?;
    Ok(Arc::new(hook) as Arc<dyn ProtectionHook>)
}

/// Create the attachment store, `None` when attachments are disabled
pub fn create_attachment_store(config: &AttachmentConfig) -> Option<Arc<dyn AttachmentStore>> {
    if !config.enabled {
        return None;
    }
    Some(Arc::new(DirectoryAttachmentStore::new(&config.root_path)) as Arc<dyn AttachmentStore>)
}

/// Every collaborator a command may need
#[derive(Clone)]
pub struct Adapters {
    /// Requisition sheet
    pub requisitions: Arc<dyn RowStore>,
    /// User-account sheet
    pub users: Arc<dyn RowStore>,
    /// Attribution and credential checks over the user sheet
    pub identity: Arc<dyn IdentityProvider>,
    /// Row protection hook
    pub protection: Arc<dyn ProtectionHook>,
    /// Attachment store, when enabled
    pub attachments: Option<Arc<dyn AttachmentStore>>,
}

impl Adapters {
    /// Build every adapter from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any client cannot be built.
    pub fn from_config(config: &ReqflowConfig) -> Result<Self> {
        let requisitions = create_row_store(&config.store, &config.store.requisition_sheet)?;
        let users = create_row_store(&config.store, &config.store.user_sheet)?;
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(SheetIdentityProvider::new(Arc::clone(&users)));

        Ok(Self {
            requisitions,
            users,
            identity,
            protection: create_protection_hook(&config.protection)?,
            attachments: create_attachment_store(&config.attachment),
        })
    }
}
