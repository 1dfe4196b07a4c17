use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FsError, Result, Role};

/// Metadata for one filesystem entry, produced by a live stat call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// Byte length; always 0 for directories
    pub size: u64,
    /// Raw mode bits, including type and setuid/setgid/sticky
    pub mode: u32,
    /// Seconds since the Unix epoch
    pub modified: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::File => "File",
            EntryKind::Directory => "Directory",
        }
    }
}

/// Blocking filesystem operations behind the shell.
///
/// Paths are expected to be absolute; anchoring user input is the caller's job.
/// No operation rolls back partial work when a later step fails.
pub trait FileSystem: Send + Sync {
    /// Direct children of `path` with their metadata
    fn list_dir(&self, path: &Path) -> Result<Vec<FileEntry>>;

    /// Names of the direct children of `path`, unsorted
    fn list_children(&self, path: &Path) -> Result<Vec<String>>;

    fn metadata(&self, path: &Path) -> Result<FileEntry>;

    fn exists(&self, path: &Path) -> bool;

    /// Copy a file, or a directory tree depth-first. Existing files at the
    /// destination are overwritten if permitted.
    fn copy(&self, source: &Path, destination: &Path) -> Result<EntryKind>;

    /// Single-step rename; fails as-is across devices.
    fn rename(&self, source: &Path, destination: &Path) -> Result<()>;

    /// Remove a file, or a directory and everything below it.
    fn delete(&self, target: &Path) -> Result<EntryKind>;

    fn chmod(&self, target: &Path, mode: u32) -> Result<()>;

    /// Create a directory and any missing parents.
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Write `content` to `path`, replacing an existing file.
    fn create_file(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// Precondition gate: `NotFound` labelled with `role` if `path` is missing
    fn ensure_exists(&self, path: &Path, role: Role) -> Result<()> {
        if self.exists(path) {
            Ok(())
        } else {
            Err(FsError::NotFound {
                role,
                path: path.to_path_buf(),
            })
        }
    }
}
