//! The tool manifest: static release configuration read from `decant.toml`.
//!
//! The manifest carries the tool's metadata (name, description, homepage,
//! license), the release repository, the pinned version, and one digest per
//! supported platform. Digest values are kept raw here; the resolver decides
//! whether they are real digests or unfilled placeholders when it builds the
//! variant matrix.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Filename the manifest is discovered under.
pub const MANIFEST_FILE: &str = "decant.toml";

/// Static configuration for one installable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolManifest {
    /// Tool name; also the executable entry expected inside the archive.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Project homepage URL.
    pub homepage: String,
    /// SPDX license identifier.
    pub license: String,
    /// Release repository URL, e.g. `https://github.com/owner/tool`.
    pub repository: String,
    /// Pinned release version, without the leading `v`.
    pub version: String,
    /// Raw digest values keyed by platform string (`linux-amd64`, ...).
    #[serde(default)]
    pub digests: BTreeMap<String, String>,
}

impl ToolManifest {
    /// Parse a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a TOML parse error for malformed input, or a manifest error
    /// when a required field fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and validate a manifest from a file.
    ///
    /// # Errors
    ///
    /// Returns a manifest error naming the path when the file cannot be
    /// read, and parse/validation errors as in [`Self::from_toml_str`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::manifest(
                format!("failed to read manifest: {e}"),
                Some(path.to_path_buf()),
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Render the manifest back to TOML.
    ///
    /// # Errors
    ///
    /// Returns a TOML serialization error (not expected for valid
    /// manifests).
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the manifest to a file.
    ///
    /// # Errors
    ///
    /// Returns serialization or I/O errors.
    pub fn write(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Walk up from `start` looking for [`MANIFEST_FILE`].
    ///
    /// # Errors
    ///
    /// Returns a manifest error when no manifest exists in `start` or any
    /// parent directory.
    pub fn discover(start: &Path) -> Result<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(MANIFEST_FILE);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !current.pop() {
                return Err(Error::manifest(
                    format!(
                        "no {MANIFEST_FILE} found in {} or any parent directory",
                        start.display()
                    ),
                    None,
                ));
            }
        }
    }

    /// The raw digest value for a platform key, if the manifest has one.
    #[must_use]
    pub fn digest_for(&self, platform: &str) -> Option<&str> {
        self.digests.get(platform).map(String::as_str)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::manifest("'name' must not be empty", None));
        }
        if self.version.trim().is_empty() {
            return Err(Error::manifest("'version' must not be empty", None));
        }
        if !self.repository.starts_with("https://") {
            return Err(Error::manifest(
                format!("'repository' must be an https URL, got '{}'", self.repository),
                None,
            ));
        }
        Ok(())
    }
}
