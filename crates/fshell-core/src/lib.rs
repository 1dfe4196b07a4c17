//! Interactive file manager shell: path resolution, display formatting,
//! session state and the command loop.

pub mod command;
pub mod config;
pub mod format;
pub mod path;
pub mod session;
pub mod shell;

pub use command::{Command, ParseError};
pub use config::ShellConfig;
pub use session::Session;
pub use shell::{Flow, Shell};
