//! Folder and file storage.
//!
//! - [`FolderStore`]: maps folder/file names onto a directory tree
//! - [`archive`]: zip generation for whole folders

pub mod archive;
mod metadata;
mod storage;

pub use archive::{spool_folder_archive, write_folder_archive, COMPRESSION_LEVEL};
pub use metadata::{FolderEntry, StoredFile};
pub use storage::{has_extension, upload_name, FolderStore};
