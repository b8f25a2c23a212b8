//! Atomic placement of the extracted executable.
//!
//! The binary is staged next to its final path, flushed, made executable,
//! and only then renamed into place. A failure partway through leaves at
//! worst a stage file without the final name; readers of the bin directory
//! never observe a half-written executable under the tool's name.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use decant_core::{Error, InstallLocations, Result};
use tracing::{debug, info};

use crate::extract::ExtractedBinary;

/// A binary written to its final location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledExecutable {
    /// Absolute path of the installed binary.
    pub path: PathBuf,
}

/// Write `binary` into the configured bin directory.
///
/// # Errors
///
/// Returns [`Error::Install`] with the offending path for any filesystem
/// failure: creating the directory, staging the bytes, setting permissions,
/// or the final rename.
pub fn place_binary(
    binary: &ExtractedBinary,
    locations: &InstallLocations,
) -> Result<InstalledExecutable> {
    let dest = locations.binary_path(&binary.name);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::install_with_source(
                "failed to create bin directory",
                Some(parent.to_path_buf()),
                e,
            )
        })?;
    }

    let stage = dest.with_extension("tmp");
    debug!(stage = %stage.display(), "staging executable");

    let mut file = fs::File::create(&stage).map_err(|e| {
        Error::install_with_source("failed to create stage file", Some(stage.clone()), e)
    })?;
    file.write_all(&binary.bytes).map_err(|e| {
        Error::install_with_source("failed to write executable", Some(stage.clone()), e)
    })?;
    file.sync_all().map_err(|e| {
        Error::install_with_source("failed to flush executable", Some(stage.clone()), e)
    })?;
    drop(file);

    // Executable bits go on only after the contents are fully on disk.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&stage, fs::Permissions::from_mode(0o755)).map_err(|e| {
            Error::install_with_source("failed to set executable mode", Some(stage.clone()), e)
        })?;
    }

    fs::rename(&stage, &dest).map_err(|e| {
        let _ = fs::remove_file(&stage);
        Error::install_with_source("failed to move executable into place", Some(dest.clone()), e)
    })?;

    info!(path = %dest.display(), "installed executable");
    Ok(InstalledExecutable { path: dest })
}
