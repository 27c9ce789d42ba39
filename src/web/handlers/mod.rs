//! API handlers.

pub mod file;

pub use file::*;

use axum::http::HeaderName;
use std::sync::Arc;

use crate::config::Config;
use crate::file::FolderStore;
use crate::web::middleware::{CredentialCheck, SharedSecret};
use crate::{JarstoreError, Result};

/// Shared state for all handlers.
pub struct AppState {
    /// Folder storage.
    pub store: FolderStore,
    /// Credential check for upload and delete.
    pub credentials: Arc<dyn CredentialCheck>,
    /// Header carrying the credential.
    pub auth_header: HeaderName,
    /// Accepted upload extension, without the dot.
    pub allowed_extension: String,
    /// Maximum files per upload request.
    pub max_files: usize,
    /// Request body limit in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create state with the default header (`pass`), extension (`jar`) and limits.
    pub fn new(store: FolderStore, credentials: Arc<dyn CredentialCheck>) -> Self {
        let storage = crate::config::StorageConfig::default();

        Self {
            store,
            credentials,
            auth_header: HeaderName::from_static("pass"),
            allowed_extension: storage.allowed_extension.clone(),
            max_files: storage.max_files,
            max_upload_bytes: storage.max_upload_bytes(),
        }
    }

    /// Build state from configuration, creating the storage root.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = FolderStore::new(&config.storage.root)?;
        let auth_header = HeaderName::from_bytes(config.auth.header.as_bytes())
            .map_err(|e| JarstoreError::Config(format!("invalid auth header name: {e}")))?;

        Ok(Self {
            store,
            credentials: Arc::new(SharedSecret::new(config.auth.secret.clone())),
            auth_header,
            allowed_extension: config.storage.allowed_extension.clone(),
            max_files: config.storage.max_files,
            max_upload_bytes: config.storage.max_upload_bytes(),
        })
    }

    /// Set the maximum number of files per upload.
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Set the request body limit in bytes.
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}
