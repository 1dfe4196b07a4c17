use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use fshell_local::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Text written before each input line
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Directory the session starts in (process cwd when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<PathBuf>,

    /// List the start directory right after the banner
    #[serde(default = "default_true")]
    pub list_on_start: bool,

    #[serde(default = "default_true")]
    pub show_banner: bool,

    /// Recursion cap for directory copies
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_prompt() -> String {
    "> ".to_string()
}
fn default_true() -> bool {
    true
}
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            start_dir: None,
            list_on_start: default_true(),
            show_banner: default_true(),
            max_depth: default_max_depth(),
        }
    }
}

impl ShellConfig {
    /// Read a JSON config written by hand or by [`ShellConfig::save`].
    /// Fields left out take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config JSON in {}", path.display()))
    }

    /// Write the effective settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to encode config")?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }
        std::fs::write(path, json + "\n")
            .with_context(|| format!("cannot write config {}", path.display()))
    }

    /// Start directory, falling back to the process working directory
    pub fn resolve_start_dir(&self) -> Result<PathBuf> {
        match &self.start_dir {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => Ok(std::env::current_dir()
                .context("failed to read current directory")?
                .join(dir)),
            None => std::env::current_dir().context("failed to read current directory"),
        }
    }
}
