// Filesystem capability shared by the shell and its backends

pub mod error;
pub mod filesystem;
pub mod mode;

pub use error::{ErrorKind, FsError, Result, Role};
pub use filesystem::{EntryKind, FileEntry, FileSystem};
pub use mode::parse_mode;
