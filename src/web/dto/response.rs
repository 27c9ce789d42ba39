//! Response DTOs for the web API.

use serde::Serialize;

use crate::datetime::to_rfc3339_millis;
use crate::file::{FolderEntry, StoredFile};

/// Plain `{"message": "..."}` response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One file accepted by an upload.
#[derive(Debug, Serialize)]
pub struct UploadedFileResponse {
    /// Filename as declared by the client.
    pub originalname: String,
    /// Storage path on the server.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
}

impl From<StoredFile> for UploadedFileResponse {
    fn from(f: StoredFile) -> Self {
        Self {
            originalname: f.original_name,
            path: f.path.display().to_string(),
            size: f.size,
        }
    }
}

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Success message.
    pub message: String,
    /// Stored files, in upload order.
    pub files: Vec<UploadedFileResponse>,
}

/// One entry of the folder info listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntryResponse {
    pub name: String,
    pub size: u64,
    /// RFC3339 with milliseconds, UTC.
    pub last_modified: String,
}

impl From<FolderEntry> for FolderEntryResponse {
    fn from(e: FolderEntry) -> Self {
        Self {
            name: e.name,
            size: e.size,
            last_modified: to_rfc3339_millis(e.modified),
        }
    }
}
