//! Folder storage for jarstore.
//!
//! Every folder is a plain directory directly under a fixed root:
//! ```text
//! {root}/
//! ├── plugins/
//! │   ├── worldedit.jar
//! │   └── essentials.jar
//! └── mods/
//!     └── sodium.jar
//! ```
//!
//! Folder and file names are the raw path segments supplied by clients.
//! They are joined onto the root as-is, so `..` escapes the root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::metadata::FolderEntry;
use crate::{JarstoreError, Result};

/// Filesystem-backed folder store.
#[derive(Debug, Clone)]
pub struct FolderStore {
    /// Root directory for all folders.
    root: PathBuf,
}

impl FolderStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Get the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a folder name to its directory.
    ///
    /// Leading separators are stripped so an absolute segment still lands
    /// under the root.
    pub fn folder_path(&self, folder: &str) -> PathBuf {
        self.root.join(folder.trim_start_matches(['/', '\\']))
    }

    /// Resolve a (folder, file) pair to its path.
    pub fn file_path(&self, folder: &str, file: &str) -> PathBuf {
        self.folder_path(folder)
            .join(file.trim_start_matches(['/', '\\']))
    }

    /// Check whether the folder exists as a directory.
    pub fn folder_exists(&self, folder: &str) -> bool {
        self.folder_path(folder).is_dir()
    }

    /// Check whether the file exists as a regular file.
    pub fn file_exists(&self, folder: &str, file: &str) -> bool {
        self.file_path(folder, file).is_file()
    }

    /// Create the folder (and any missing parents) if it does not exist yet.
    pub fn ensure_folder(&self, folder: &str) -> Result<PathBuf> {
        let path = self.folder_path(folder);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Check whether the folder has no entries at all.
    pub fn is_empty(&self, folder: &str) -> Result<bool> {
        let mut entries = self.read_folder(folder)?;
        Ok(entries.next().is_none())
    }

    /// List the immediate entries of a folder.
    ///
    /// Order is whatever the directory enumeration yields.
    pub fn list_entries(&self, folder: &str) -> Result<Vec<FolderEntry>> {
        self.read_folder(folder)?
            .map(|entry| FolderEntry::from_dir_entry(&entry?))
            .collect()
    }

    /// Write `content` as `name` inside the folder, replacing any existing file.
    ///
    /// The folder must already exist; see [`FolderStore::ensure_folder`].
    pub fn write_file(&self, folder: &str, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.file_path(folder, name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Read a whole file.
    pub fn read_file(&self, folder: &str, file: &str) -> Result<Vec<u8>> {
        let path = self.file_path(folder, file);
        if !path.is_file() {
            return Err(JarstoreError::NotFound("File".to_string()));
        }

        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(JarstoreError::NotFound("File".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a single file. Directories are never removed.
    pub fn remove_file(&self, folder: &str, file: &str) -> Result<()> {
        let path = self.file_path(folder, file);
        if !path.is_file() {
            return Err(JarstoreError::NotFound("File".to_string()));
        }

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(JarstoreError::NotFound("File".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn read_folder(&self, folder: &str) -> Result<fs::ReadDir> {
        let path = self.folder_path(folder);
        if !path.is_dir() {
            return Err(JarstoreError::NotFound("Folder".to_string()));
        }
        Ok(fs::read_dir(path)?)
    }
}

/// Check that `filename` ends in exactly `.{extension}`.
///
/// Case-sensitive. A bare dotfile such as `.jar` has no extension.
pub fn has_extension(filename: &str, extension: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == extension)
}

/// Reduce a client-declared upload filename to its final component.
///
/// Both `/` and `\` count as separators. `.` and `..` reduce to an empty
/// name, which never passes the extension check.
pub fn upload_name(declared: &str) -> &str {
    let name = declared.rsplit(['/', '\\']).next().unwrap_or(declared);
    if name == "." || name == ".." {
        ""
    } else {
        name
    }
}
