//! Metadata for entries inside a folder.

use std::fs::DirEntry;
use std::time::SystemTime;

use crate::Result;

/// A single immediate entry of a folder, as reported by the folder info endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    /// Entry name (not a path).
    pub name: String,
    /// Size in bytes, following symlinks.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
}

impl FolderEntry {
    /// Stat a directory entry.
    ///
    /// Symlinks are followed, so a dangling link is an error.
    pub fn from_dir_entry(entry: &DirEntry) -> Result<Self> {
        let metadata = std::fs::metadata(entry.path())?;

        Ok(Self {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
            modified: metadata.modified()?,
        })
    }
}

/// A file written by an upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Filename as declared by the client.
    pub original_name: String,
    /// Where the file landed on disk.
    pub path: std::path::PathBuf,
    /// Bytes written.
    pub size: u64,
}
