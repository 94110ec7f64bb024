use crate::domain::status::{DocumentStatus, DocumentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a compliance document is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentHolder {
    Company,
    User(Uuid),
}

/// A compliance artifact (identity or business document). Metadata lives
/// here; the bytes live in the blob store under `file_name`. Rows are only
/// ever soft-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub holder: DocumentHolder,
    pub doc_type: DocumentType,
    /// Display name, taken from the uploaded file's base name.
    pub name: String,
    /// Storage key: a fresh UUID plus the original extension, so uploads
    /// with colliding names never overwrite each other.
    pub file_name: String,
    pub status: DocumentStatus,
    pub failure_reason: Option<String>,
    /// Set once the document has been submitted to the processor.
    pub processor_uri: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        tenant_id: Uuid,
        holder: DocumentHolder,
        doc_type: DocumentType,
        original_name: &str,
    ) -> Self {
        let (name, file_name) = storage_names(original_name);
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            holder,
            doc_type,
            name,
            file_name,
            status: DocumentStatus::Pending,
            failure_reason: None,
            processor_uri: None,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn record_outcome(&mut self, status: DocumentStatus, failure_reason: Option<String>) {
        self.status = status;
        self.failure_reason = failure_reason;
    }
}

fn storage_names(original_name: &str) -> (String, String) {
    let (base, extension) = match original_name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base, Some(ext)),
        _ => (original_name, None),
    };
    let file_name = match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    };
    (base.to_string(), file_name)
}
