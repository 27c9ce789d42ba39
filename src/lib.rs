//! jarstore - folder-based `.jar` storage over HTTP.
//!
//! Clients upload files into named folders, list folder contents, download
//! single files or a whole folder as a zip archive, and delete files.

pub mod config;
pub mod datetime;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{JarstoreError, Result};
pub use file::{FolderEntry, FolderStore, StoredFile};
pub use web::handlers::AppState;
pub use web::middleware::{CredentialCheck, SharedSecret};
pub use web::{create_router, ApiError, WebServer};
