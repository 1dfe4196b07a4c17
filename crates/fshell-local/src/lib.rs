// Host filesystem backend

pub mod filesystem;

pub use filesystem::{LocalFileSystem, DEFAULT_MAX_DEPTH};
