use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FsError>;

/// Which argument of an operation a precondition failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Source,
    Target,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Source => f.write_str("Source"),
            Role::Target => f.write_str("Target"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("{role} does not exist: {}", path.display())]
    NotFound { role: Role, path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid mode: {input:?} (expected octal digits, e.g. 755)")]
    InvalidMode { input: String },
}

/// Coarse classification of an [`FsError`], for callers that branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    Io,
    InvalidMode,
}

impl FsError {
    /// Wrap a primitive failure with the operation and path that produced it
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        FsError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::NotFound { .. } => ErrorKind::NotFound,
            FsError::NotADirectory { .. } => ErrorKind::NotADirectory,
            FsError::Io { .. } => ErrorKind::Io,
            FsError::InvalidMode { .. } => ErrorKind::InvalidMode,
        }
    }

    /// The underlying OS error kind, when the failure came from a primitive
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
