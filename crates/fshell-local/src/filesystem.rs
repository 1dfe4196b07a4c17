use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use fshell_platform::{EntryKind, FileEntry, FileSystem, FsError, Result, Role};
use tracing::{debug, warn};

/// Deepest directory nesting a recursive copy will descend into
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub struct LocalFileSystem {
    max_depth: usize,
}

impl LocalFileSystem {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn to_file_entry(path: &Path, meta: &Metadata) -> FileEntry {
        let modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());

        let is_dir = meta.is_dir();

        FileEntry {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string_lossy().to_string()),
            path: path.to_path_buf(),
            is_dir,
            size: if is_dir { 0 } else { meta.len() },
            mode: mode_bits(meta),
            modified,
        }
    }

    /// Stat following symlinks, falling back to the link itself when it dangles
    fn stat(path: &Path) -> io::Result<Metadata> {
        match fs::metadata(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => fs::symlink_metadata(path),
            other => other,
        }
    }

    fn copy_dir(&self, source: &Path, destination: &Path, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(FsError::io(
                "copy",
                source,
                io::Error::new(io::ErrorKind::Other, "maximum directory depth exceeded"),
            ));
        }

        // The directory exists before any of its children are written
        fs::create_dir_all(destination).map_err(|e| FsError::io("mkdir", destination, e))?;

        // Walk raw OsString names so non-UTF-8 entries join back unchanged
        let entries = fs::read_dir(source).map_err(|e| FsError::io("list", source, e))?;
        for entry in entries {
            let name = entry.map_err(|e| FsError::io("list", source, e))?.file_name();
            let child_source = source.join(&name);
            let child_destination = destination.join(&name);
            let meta =
                fs::metadata(&child_source).map_err(|e| FsError::io("stat", &child_source, e))?;

            if meta.is_dir() {
                self.copy_dir(&child_source, &child_destination, depth + 1)?;
            } else {
                copy_file(&child_source, &child_destination)?;
            }
        }
        Ok(())
    }
}

/// Byte-copy one file. Copying a file onto itself (same path, symlink or
/// hard link) is a no-op: `fs::copy` would truncate the destination first.
fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if is_same_file(source, destination) {
        debug!("{} and {} are the same file, skipping", source.display(), destination.display());
        return Ok(());
    }
    fs::copy(source, destination).map_err(|e| FsError::io("copy", source, e))?;
    Ok(())
}

#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(x), Ok(y)) => x.dev() == y.dev() && x.ino() == y.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn mode_bits(meta: &Metadata) -> u32 {
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn mode_bits(meta: &Metadata) -> u32 {
    let mut mode = 0o444;
    if !meta.permissions().readonly() {
        mode |= 0o222;
    }
    if meta.is_dir() {
        mode |= 0o111;
    }
    mode
}

impl FileSystem for LocalFileSystem {
    fn list_dir(&self, path: &Path) -> Result<Vec<FileEntry>> {
        let entries = fs::read_dir(path).map_err(|e| FsError::io("list", path, e))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FsError::io("list", path, e))?;
            let entry_path = entry.path();

            match Self::stat(&entry_path) {
                Ok(meta) => result.push(Self::to_file_entry(&entry_path, &meta)),
                // Removed between read_dir and stat
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!("skipping vanished entry {}", entry_path.display());
                }
                Err(e) => return Err(FsError::io("stat", &entry_path, e)),
            }
        }

        // Sort: directories first, then alphabetically
        result.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        Ok(result)
    }

    fn list_children(&self, path: &Path) -> Result<Vec<String>> {
        let entries = fs::read_dir(path).map_err(|e| FsError::io("list", path, e))?;
        entries
            .map(|entry| {
                entry
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .map_err(|e| FsError::io("list", path, e))
            })
            .collect()
    }

    fn metadata(&self, path: &Path) -> Result<FileEntry> {
        let meta = fs::metadata(path).map_err(|e| FsError::io("stat", path, e))?;
        Ok(Self::to_file_entry(path, &meta))
    }

    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still exists as far as rm/mv are concerned
        fs::symlink_metadata(path).is_ok()
    }

    fn copy(&self, source: &Path, destination: &Path) -> Result<EntryKind> {
        self.ensure_exists(source, Role::Source)?;
        let meta = fs::metadata(source).map_err(|e| FsError::io("copy", source, e))?;

        if meta.is_dir() {
            if destination.starts_with(source) {
                return Err(FsError::io(
                    "copy",
                    source,
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "cannot copy a directory into itself",
                    ),
                ));
            }
            debug!("copying tree {} -> {}", source.display(), destination.display());
            self.copy_dir(source, destination, 0)?;
            Ok(EntryKind::Directory)
        } else {
            copy_file(source, destination)?;
            Ok(EntryKind::File)
        }
    }

    fn rename(&self, source: &Path, destination: &Path) -> Result<()> {
        self.ensure_exists(source, Role::Source)?;
        fs::rename(source, destination).map_err(|e| FsError::io("move", source, e))
    }

    fn delete(&self, target: &Path) -> Result<EntryKind> {
        self.ensure_exists(target, Role::Target)?;
        // Do not follow a symlink: removing a link never touches what it points at
        let meta = fs::symlink_metadata(target).map_err(|e| FsError::io("delete", target, e))?;

        if meta.is_dir() {
            fs::remove_dir_all(target).map_err(|e| FsError::io("delete", target, e))?;
            Ok(EntryKind::Directory)
        } else {
            fs::remove_file(target).map_err(|e| FsError::io("delete", target, e))?;
            Ok(EntryKind::File)
        }
    }

    #[cfg(unix)]
    fn chmod(&self, target: &Path, mode: u32) -> Result<()> {
        self.ensure_exists(target, Role::Target)?;
        fs::set_permissions(target, fs::Permissions::from_mode(mode))
            .map_err(|e| FsError::io("chmod", target, e))
    }

    #[cfg(not(unix))]
    fn chmod(&self, target: &Path, mode: u32) -> Result<()> {
        self.ensure_exists(target, Role::Target)?;
        let mut perms = fs::metadata(target)
            .map_err(|e| FsError::io("chmod", target, e))?
            .permissions();
        perms.set_readonly(mode & 0o200 == 0);
        fs::set_permissions(target, perms).map_err(|e| FsError::io("chmod", target, e))
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| FsError::io("mkdir", path, e))
    }

    fn create_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        fs::write(path, content).map_err(|e| FsError::io("create", path, e))
    }
}
