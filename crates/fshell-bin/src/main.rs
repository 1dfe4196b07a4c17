use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use fshell_core::{Session, Shell, ShellConfig};
use fshell_local::LocalFileSystem;

#[derive(Parser, Debug)]
#[command(name = "fshell")]
#[command(about = "Interactive shell for browsing and editing a filesystem")]
#[command(version)]
struct Cli {
    /// Path to a JSON config file (never looked up implicitly)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to start in (default: current directory)
    #[arg(long)]
    start_dir: Option<PathBuf>,

    /// Prompt shown before each command
    #[arg(long)]
    prompt: Option<String>,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,

    /// Skip the initial directory listing
    #[arg(long)]
    no_list: bool,

    /// Write the effective config (file + flags) as JSON to PATH and exit
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with command output on stdout
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    info!(
        "fshell v{} starting (os={}, arch={})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    );

    let mut config = match &cli.config {
        Some(path) => {
            info!("loading config from {}", path.display());
            ShellConfig::load(path)?
        }
        None => ShellConfig::default(),
    };

    // CLI args override config file
    if let Some(dir) = cli.start_dir {
        config.start_dir = Some(dir);
    }
    if let Some(prompt) = cli.prompt {
        config.prompt = prompt;
    }
    if cli.no_banner {
        config.show_banner = false;
    }
    if cli.no_list {
        config.list_on_start = false;
    }

    if let Some(path) = &cli.save_config {
        config.save(path)?;
        info!("config written to {}", path.display());
        return Ok(());
    }

    let start_dir = config.resolve_start_dir()?;
    let fs = LocalFileSystem::with_max_depth(config.max_depth);
    let session = Session::open(&start_dir, Box::new(fs))
        .with_context(|| format!("cannot start in {}", start_dir.display()))?;

    let mut shell = Shell::new(session, config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = shell.run(stdin.lock(), &mut stdout) {
        // stdin/stdout went away; nothing more can be printed to the user
        error!("terminal I/O failed: {}", e);
    }

    info!("fshell exiting");
    Ok(())
}
