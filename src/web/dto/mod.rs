//! Data transfer objects for the web API.

pub mod response;

pub use response::{FolderEntryResponse, MessageResponse, UploadResponse, UploadedFileResponse};
