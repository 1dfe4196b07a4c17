use std::io::{self, BufRead, Write};

use fshell_platform::{FileEntry, FsError};
use tracing::{debug, warn};

use crate::command::{Command, HELP};
use crate::config::ShellConfig;
use crate::format::{format_modified, format_permissions, format_size};
use crate::session::Session;

/// Whether the loop should keep reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Read-parse-dispatch loop over a [`Session`].
///
/// Filesystem failures are printed and the loop carries on; only I/O errors
/// on the input or output streams end `run` early.
pub struct Shell {
    session: Session,
    config: ShellConfig,
}

impl Shell {
    pub fn new(session: Session, config: ShellConfig) -> Self {
        Self { session, config }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        if self.config.show_banner {
            writeln!(out, "fshell - interactive file manager")?;
            writeln!(out, "Type \"help\" for available commands")?;
        }
        if self.config.list_on_start {
            self.print_listing(out)?;
        }

        let mut buf = Vec::new();
        loop {
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                // EOF behaves like `exit`
                writeln!(out)?;
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buf);

            if self.execute(&line, out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Run a single input line
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };
        debug!("dispatch {:?}", command);

        match command {
            Command::Empty => {}
            Command::List => self.print_listing(out)?,
            Command::ChangeDir(dir) => match self.session.change_directory(&dir) {
                Ok(path) => writeln!(out, "Changed directory to: {}", path.display())?,
                Err(e) => report(out, "changing directory", &e)?,
            },
            Command::Pwd => {
                writeln!(out, "Current directory: {}", self.session.current_dir().display())?
            }
            Command::Mkdir(name) => match self.session.mkdir(&name) {
                Ok(()) => writeln!(out, "Directory created: {}", name)?,
                Err(e) => report(out, "creating directory", &e)?,
            },
            Command::Touch(name) => match self.session.create_file(&name, b"") {
                Ok(()) => writeln!(out, "File created: {}", name)?,
                Err(e) => report(out, "creating file", &e)?,
            },
            Command::Copy {
                source,
                destination,
            } => match self.session.copy(&source, &destination) {
                Ok(kind) => writeln!(out, "{} copied: {} -> {}", kind.label(), source, destination)?,
                Err(e) => report(out, "copying", &e)?,
            },
            Command::Move {
                source,
                destination,
            } => match self.session.move_item(&source, &destination) {
                Ok(()) => writeln!(out, "Moved: {} -> {}", source, destination)?,
                Err(e) => report(out, "moving", &e)?,
            },
            Command::Delete(target) => match self.session.delete(&target) {
                Ok(kind) => writeln!(out, "{} deleted: {}", kind.label(), target)?,
                Err(e) => report(out, "deleting", &e)?,
            },
            Command::Chmod { target, mode } => match self.session.chmod(&target, &mode) {
                Ok(_) => writeln!(out, "Permissions changed: {} -> {}", target, mode)?,
                Err(e) => report(out, "changing permissions", &e)?,
            },
            Command::Help => write!(out, "{}", HELP)?,
            Command::Exit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn print_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let dir = self.session.current_dir();
        match self.session.list() {
            Ok(entries) => {
                writeln!(out, "Contents of: {}", dir.display())?;
                writeln!(out, "{}", "-".repeat(50))?;
                for entry in &entries {
                    writeln!(out, "{}", format_row(entry))?;
                }
                Ok(())
            }
            Err(e) => report(out, "listing files", &e),
        }
    }
}

fn format_row(entry: &FileEntry) -> String {
    let (tag, size) = if entry.is_dir {
        ("[DIR]", String::new())
    } else {
        ("[FILE]", format!("({})", format_size(entry.size)))
    };
    format!(
        "{:<6} {:<30} {:<10} {} {}",
        tag,
        entry.name,
        size,
        format_permissions(entry.mode),
        format_modified(entry.modified)
    )
}

fn report<W: Write>(out: &mut W, action: &str, err: &FsError) -> io::Result<()> {
    warn!("{} failed: {}", action, err);
    writeln!(out, "Error {}: {}", action, err)
}
