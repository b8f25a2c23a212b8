//! Validated release variant matrix.
//!
//! The manifest pins one digest per supported platform. Building a
//! [`VariantMatrix`] validates the whole matrix up front: every platform in
//! [`Platform::all`] must have a well-formed digest, and no unknown platform
//! keys may be present. Resolution afterwards is a pure lookup, so an
//! unsupported platform can never silently receive another platform's
//! artifact.

use std::collections::BTreeMap;
use std::str::FromStr;

use decant_core::{Digest, Error, Platform, ReleaseVariant, Result, ToolManifest};
use tracing::debug;

/// Archive filename for one release variant.
#[must_use]
pub fn archive_filename(tool: &str, version: &str, platform: Platform) -> String {
    format!(
        "{tool}_{version}_{os}_{arch}.tar.gz",
        os = platform.os,
        arch = platform.arch
    )
}

/// Download URL for one release variant.
#[must_use]
pub fn download_url(repository: &str, tool: &str, version: &str, platform: Platform) -> String {
    format!(
        "{repository}/releases/download/v{version}/{name}",
        name = archive_filename(tool, version, platform)
    )
}

/// URL of the checksum manifest published alongside the archives.
#[must_use]
pub fn checksums_url(repository: &str, version: &str) -> String {
    format!("{repository}/releases/download/v{version}/checksums.txt")
}

/// Complete mapping from supported platform to pinned release variant.
///
/// Constructed only through [`VariantMatrix::from_manifest`], which refuses
/// partial or malformed matrices.
#[derive(Debug, Clone)]
pub struct VariantMatrix {
    tool: String,
    version: String,
    repository: String,
    variants: BTreeMap<Platform, ReleaseVariant>,
}

impl VariantMatrix {
    /// Build the matrix from a manifest, validating every cell.
    ///
    /// # Errors
    ///
    /// Returns a manifest error for digest keys that do not name a supported
    /// platform or for platforms with no digest entry,
    /// [`Error::PlaceholderDigest`] for cells still carrying an unfilled
    /// placeholder, and [`Error::InvalidDigest`] for values that are not
    /// 64 hex characters.
    pub fn from_manifest(manifest: &ToolManifest) -> Result<Self> {
        // Reject unknown keys first: a typo like `darwin-x86` would
        // otherwise surface as a confusing "missing digest" for the cell it
        // was meant to fill.
        for key in manifest.digests.keys() {
            if Platform::from_str(key).is_err() {
                return Err(Error::manifest(
                    format!("unknown digest key '{key}' (expected one of: darwin-amd64, darwin-arm64, linux-amd64, linux-arm64)"),
                    None,
                ));
            }
        }

        let mut variants = BTreeMap::new();
        for &platform in Platform::all() {
            let raw = manifest.digest_for(&platform.to_string()).ok_or_else(|| {
                Error::manifest(format!("missing digest for platform {platform}"), None)
            })?;
            if Digest::is_placeholder(raw) {
                return Err(Error::placeholder_digest(platform.to_string()));
            }
            let digest = Digest::try_from_hex(raw)
                .ok_or_else(|| Error::invalid_digest(platform.to_string(), raw))?;
            let url = download_url(
                &manifest.repository,
                &manifest.name,
                &manifest.version,
                platform,
            );
            variants.insert(
                platform,
                ReleaseVariant {
                    platform,
                    version: manifest.version.clone(),
                    url,
                    digest,
                },
            );
        }

        debug!(
            tool = %manifest.name,
            version = %manifest.version,
            cells = variants.len(),
            "validated release variant matrix"
        );

        Ok(Self {
            tool: manifest.name.clone(),
            version: manifest.version.clone(),
            repository: manifest.repository.clone(),
            variants,
        })
    }

    /// Tool name the matrix was built for.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Pinned release version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Release repository URL.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// URL of the checksum manifest for this release.
    #[must_use]
    pub fn checksums_url(&self) -> String {
        checksums_url(&self.repository, &self.version)
    }

    /// Look up the variant pinned for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VariantNotFound`] when no variant is pinned for the
    /// platform. The matrix is total over [`Platform::all`], so this only
    /// fires for platforms outside the supported set.
    pub fn resolve(&self, platform: Platform) -> Result<ReleaseVariant> {
        self.variants
            .get(&platform)
            .cloned()
            .ok_or_else(|| Error::variant_not_found(platform.to_string(), &self.version))
    }

    /// All pinned variants in platform order.
    pub fn variants(&self) -> impl Iterator<Item = &ReleaseVariant> {
        self.variants.values()
    }
}
