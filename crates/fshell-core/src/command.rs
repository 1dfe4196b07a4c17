use thiserror::Error;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    List,
    ChangeDir(String),
    Pwd,
    Mkdir(String),
    Touch(String),
    Copy { source: String, destination: String },
    Move { source: String, destination: String },
    Delete(String),
    Chmod { target: String, mode: String },
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Unknown command: {0}. Type \"help\" for available commands.")]
    Unknown(String),
}

pub const USAGE_CD: &str = "cd <directory>";
pub const USAGE_MKDIR: &str = "mkdir <directory_name>";
pub const USAGE_TOUCH: &str = "touch <filename>";
pub const USAGE_CP: &str = "cp <source> <destination>";
pub const USAGE_MV: &str = "mv <source> <destination>";
pub const USAGE_RM: &str = "rm <file_or_directory>";
pub const USAGE_CHMOD: &str = "chmod <file> <permissions> (e.g., chmod file.txt 755)";

pub const HELP: &str = "\
File Manager Commands:
----------------------------------------
ls, list            - List files and directories
cd <dir>            - Change directory
mkdir <name>        - Create directory
touch <name>        - Create empty file
cp <src> <dest>     - Copy file/directory
mv <src> <dest>     - Move/rename file/directory
rm <target>         - Delete file/directory
chmod <file> <mode> - Change permissions (e.g., chmod file.txt 755)
pwd                 - Show current directory
help, h             - Show this help
exit, quit          - Exit file manager
";

impl Command {
    /// Split on whitespace, match the verb case-insensitively and check arity.
    /// Arguments beyond the ones a command takes are ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::Empty);
        };
        let args: Vec<&str> = words.collect();

        let one = |usage| args.first().map(|a| a.to_string()).ok_or(ParseError::Usage(usage));
        let two = |usage| match args.as_slice() {
            [a, b, ..] => Ok((a.to_string(), b.to_string())),
            _ => Err(ParseError::Usage(usage)),
        };

        let cmd = match verb.to_lowercase().as_str() {
            "ls" | "list" => Command::List,
            "cd" => Command::ChangeDir(one(USAGE_CD)?),
            "pwd" => Command::Pwd,
            "mkdir" => Command::Mkdir(one(USAGE_MKDIR)?),
            "touch" => Command::Touch(one(USAGE_TOUCH)?),
            "cp" | "copy" => {
                let (source, destination) = two(USAGE_CP)?;
                Command::Copy {
                    source,
                    destination,
                }
            }
            "mv" | "move" => {
                let (source, destination) = two(USAGE_MV)?;
                Command::Move {
                    source,
                    destination,
                }
            }
            "rm" | "delete" => Command::Delete(one(USAGE_RM)?),
            "chmod" => {
                let (target, mode) = two(USAGE_CHMOD)?;
                Command::Chmod { target, mode }
            }
            "help" | "h" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => return Err(ParseError::Unknown(verb.to_string())),
        };
        Ok(cmd)
    }
}
