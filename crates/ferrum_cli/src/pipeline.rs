//! Shared helpers for CLI commands.
//!
//! Project root resolution and artifact output, used by `convert` and `demo`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ferrum_config::CONFIG_FILE;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `ferrum.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from `cwd` looking for `ferrum.toml`.
pub fn resolve_project_root(
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config_path) => {
            let p = PathBuf::from(config_path);
            if p.is_file() {
                Ok(p.parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| PathBuf::from(".")))
            } else {
                Ok(p)
            }
        }
        None => find_project_root(cwd),
    }
}

/// Writes `text` to `path`, creating parent directories, or to stdout.
pub fn write_output(text: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, text)
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()
        }
    }
}
