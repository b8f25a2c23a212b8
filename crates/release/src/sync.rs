//! Digest synchronization from a published release.
//!
//! `decant sync-digests` downloads the release's `checksums.txt` and
//! rewrites the manifest's digest table from it. The rewrite is
//! all-or-nothing: if any supported platform is missing from the checksum
//! manifest, nothing is changed, so the digest table can never end up half
//! pinned to one release and half to another.

use std::collections::BTreeMap;

use decant_core::{Error, Platform, Result, ToolManifest};
use tracing::info;

use crate::checksums::ChecksumsManifest;
use crate::client::ReleaseClient;
use crate::resolve::{archive_filename, checksums_url};

/// Fetch `checksums.txt` for the manifest's pinned version and return a
/// manifest with all digest cells replaced.
///
/// # Errors
///
/// Returns fetch errors from the checksum download, parse errors for a
/// malformed checksum manifest, and [`Error::VariantNotFound`] when the
/// release does not publish an archive for every supported platform.
pub async fn sync_digests(client: &ReleaseClient, manifest: &ToolManifest) -> Result<ToolManifest> {
    let url = checksums_url(&manifest.repository, &manifest.version);
    let content = client.fetch_checksums(&url).await?;
    let checksums = ChecksumsManifest::parse(&content)?;
    apply_checksums(manifest, &checksums)
}

/// Replace the manifest's digest table from a parsed checksum manifest.
///
/// Every platform in [`Platform::all`] must have a matching archive entry;
/// otherwise nothing is applied.
///
/// # Errors
///
/// Returns [`Error::VariantNotFound`] for the first platform whose archive
/// is absent from `checksums`.
pub fn apply_checksums(
    manifest: &ToolManifest,
    checksums: &ChecksumsManifest,
) -> Result<ToolManifest> {
    let mut digests = BTreeMap::new();
    for &platform in Platform::all() {
        let filename = archive_filename(&manifest.name, &manifest.version, platform);
        let digest = checksums.digest_for(&filename).ok_or_else(|| {
            Error::variant_not_found(platform.to_string(), &manifest.version)
        })?;
        digests.insert(platform.to_string(), digest.as_str().to_string());
    }

    info!(
        tool = %manifest.name,
        version = %manifest.version,
        platforms = digests.len(),
        "synced digests from release checksums"
    );

    let mut updated = manifest.clone();
    updated.digests = digests;
    Ok(updated)
}
