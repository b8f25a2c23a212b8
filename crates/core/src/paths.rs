//! Install locations for binaries and completion scripts.
//!
//! Defaults follow platform conventions via `dirs`:
//!
//! | Platform | bindir | completions root |
//! |----------|--------|------------------|
//! | **Linux** | `~/.local/bin` (XDG) | `~/.local/share/decant/completions` |
//! | **macOS** | `~/.local/bin` | `~/Library/Application Support/decant/completions` |
//!
//! Both support environment overrides for testing and CI:
//! - `DECANT_BIN_DIR` - Override the binary directory
//! - `DECANT_COMPLETIONS_DIR` - Override the completions root

use crate::{Error, Result, Shell};
use std::path::PathBuf;

/// Where the installer writes binaries and completion scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLocations {
    /// Directory the executable is placed in.
    pub bindir: PathBuf,
    /// Root directory holding one subdirectory per shell.
    pub completions_dir: PathBuf,
}

impl InstallLocations {
    /// Build locations from optional overrides, falling back to env
    /// variables and then platform defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no override is given and the home
    /// directory cannot be determined.
    pub fn resolve(bindir: Option<PathBuf>, completions_dir: Option<PathBuf>) -> Result<Self> {
        let bindir = match bindir {
            Some(dir) => dir,
            None => default_bindir()?,
        };
        let completions_dir = match completions_dir {
            Some(dir) => dir,
            None => default_completions_dir()?,
        };
        Ok(Self {
            bindir,
            completions_dir,
        })
    }

    /// Final path of the installed executable.
    #[must_use]
    pub fn binary_path(&self, tool: &str) -> PathBuf {
        self.bindir.join(tool)
    }

    /// Final path of one shell's completion script,
    /// `{completions_dir}/{shell}/{tool}.{ext}`.
    #[must_use]
    pub fn completion_path(&self, shell: Shell, tool: &str) -> PathBuf {
        self.completions_dir
            .join(shell.name())
            .join(shell.completion_filename(tool))
    }
}

/// Default directory for installed executables.
///
/// Resolution order:
/// 1. `DECANT_BIN_DIR` environment variable
/// 2. `dirs::executable_dir()` (XDG `~/.local/bin` on Linux)
/// 3. `~/.local/bin`
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_bindir() -> Result<PathBuf> {
    let overridden = std::env::var("DECANT_BIN_DIR")
        .ok()
        .filter(|dir| !dir.is_empty());
    if let Some(dir) = overridden {
        return Ok(PathBuf::from(dir));
    }

    // executable_dir() returns None on macOS, so fall back to ~/.local/bin
    if let Some(dir) = dirs::executable_dir() {
        return Ok(dir);
    }
    let home = dirs::home_dir()
        .ok_or_else(|| Error::config("could not determine home directory for bindir"))?;
    Ok(home.join(".local").join("bin"))
}

/// Default root directory for completion scripts.
///
/// Resolution order:
/// 1. `DECANT_COMPLETIONS_DIR` environment variable
/// 2. `dirs::data_local_dir()` + `/decant/completions`
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn default_completions_dir() -> Result<PathBuf> {
    let overridden = std::env::var("DECANT_COMPLETIONS_DIR")
        .ok()
        .filter(|dir| !dir.is_empty());
    if let Some(dir) = overridden {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_local_dir()
        .ok_or_else(|| Error::config("could not determine data directory for completions"))?;
    Ok(base.join("decant").join("completions"))
}
