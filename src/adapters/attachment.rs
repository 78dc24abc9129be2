//! Attachment storage
//!
//! A requisition may carry one attachment. Storing it is best effort: any
//! failure leaves the attachment reference blank and the requisition is
//! still created.

use crate::domain::context::ResultExt;
use crate::domain::{ReqflowError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File submitted with a requisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPayload {
    /// Original file name
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl AttachmentPayload {
    /// Read a payload from disk
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read attachment {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self { file_name, bytes })
    }
}

/// Destination for attachment payloads
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store the payload below `folder_id` and return its reference
    async fn store(&self, payload: &AttachmentPayload, folder_id: &str) -> Result<String>;
}

/// Stores attachments as files below a root directory
///
/// Files land at `<root>/<folder_id>/<uuid>_<file name>`.
#[derive(Debug, Clone)]
pub struct DirectoryAttachmentStore {
    root: PathBuf,
}

impl DirectoryAttachmentStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_control() || c == ':' { '_' } else { c })
        .collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "attachment".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl AttachmentStore for DirectoryAttachmentStore {
    async fn store(&self, payload: &AttachmentPayload, folder_id: &str) -> Result<String> {
        if folder_id.trim().is_empty() || folder_id.contains("..") {
            return Err(ReqflowError::Attachment(format!(
                "Invalid attachment folder '{folder_id}'"
            )));
        }

        let folder = self.root.join(folder_id);
        tokio::fs::create_dir_all(&folder)
            .await
            .with_context(|| format!("Failed to create {}", folder.display()))?;

        let file_name = format!(
            "{}_{}",
            Uuid::new_v4().simple(),
            sanitize_file_name(&payload.file_name)
        );
        let path = folder.join(file_name);
        tokio::fs::write(&path, &payload.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(path = %path.display(), bytes = payload.bytes.len(), "Stored attachment");
        Ok(path.to_string_lossy().into_owned())
    }
}

/// Store the payload if there is one; any failure yields an empty reference
pub async fn store_or_empty(
    store: Option<&dyn AttachmentStore>,
    payload: Option<&AttachmentPayload>,
    folder_id: &str,
) -> String {
    let (Some(store), Some(payload)) = (store, payload) else {
        return String::new();
    };
    match store.store(payload, folder_id).await {
        Ok(reference) => reference,
        Err(e) => {
            tracing::warn!(
                file_name = %payload.file_name,
                error = %e,
                "Attachment not stored, continuing without it"
            );
            String::new()
        }
    }
}
