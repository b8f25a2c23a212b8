//! The sequential install pipeline.
//!
//! Stages run strictly in order: resolve, fetch, verify, install,
//! provision completions. The first fatal error aborts before any later
//! stage runs, and nothing touches the filesystem until verification has
//! passed. Completion provisioning is the one non-fatal stage; its
//! per-shell outcomes ride along in the returned report.

use decant_core::{FetchedArchive, InstallLocations, Platform, Result, ToolManifest};
use decant_release::{ReleaseClient, VariantMatrix};
use tracing::info;

use crate::completions::{CompletionOutcome, provision_completions};
use crate::extract::extract_binary;
use crate::place::{InstalledExecutable, place_binary};

/// Everything a completed install produced.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Tool that was installed.
    pub tool: String,
    /// Version that was installed.
    pub version: String,
    /// Platform variant that was selected.
    pub platform: Platform,
    /// The installed executable.
    pub executable: InstalledExecutable,
    /// Per-shell completion outcomes, one per supported shell.
    pub completions: Vec<CompletionOutcome>,
}

/// Run the full install pipeline for `manifest` on `platform`.
///
/// With `with_completions` false the provisioning stage is skipped and the
/// report carries no completion outcomes.
///
/// # Errors
///
/// Returns the first fatal stage error: manifest validation, variant
/// resolution, fetch, digest verification, extraction, or placement.
/// Completion failures do not propagate; they are recorded in the report.
pub async fn run_install(
    client: &ReleaseClient,
    manifest: &ToolManifest,
    platform: Platform,
    locations: &InstallLocations,
    with_completions: bool,
) -> Result<InstallReport> {
    info!(
        tool = %manifest.name,
        version = %manifest.version,
        %platform,
        "starting install"
    );

    let matrix = VariantMatrix::from_manifest(manifest)?;
    let variant = matrix.resolve(platform)?;
    let fetched = client.fetch_archive(&variant).await?;
    let executable = install_fetched(fetched, &manifest.name, locations)?;
    let completions = if with_completions {
        provision_completions(&executable, &manifest.name, locations).await
    } else {
        Vec::new()
    };

    info!(
        tool = %manifest.name,
        version = %manifest.version,
        path = %executable.path.display(),
        "install complete"
    );

    Ok(InstallReport {
        tool: manifest.name.clone(),
        version: manifest.version.clone(),
        platform,
        executable,
        completions,
    })
}

/// Post-fetch stages: verify, extract, place.
///
/// The digest gate lives here; an archive that fails verification is
/// dropped before anything is written to disk.
///
/// # Errors
///
/// Returns digest, archive, and install errors from the individual stages.
pub fn install_fetched(
    fetched: FetchedArchive,
    tool: &str,
    locations: &InstallLocations,
) -> Result<InstalledExecutable> {
    let verified = fetched.verify()?;
    let binary = extract_binary(&verified, tool)?;
    place_binary(&binary, locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use decant_core::{Digest, Error, ReleaseVariant};
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn locations(root: &TempDir) -> InstallLocations {
        InstallLocations::resolve(
            Some(root.path().join("bin")),
            Some(root.path().join("completions")),
        )
        .unwrap()
    }

    fn tool_archive(name: &str, contents: &[u8]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, name, contents).unwrap();
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn variant_for(bytes: &[u8], digest: Digest) -> FetchedArchive {
        FetchedArchive {
            variant: ReleaseVariant {
                platform: Platform::from_str("linux-amd64").unwrap(),
                version: "0.2.1".to_string(),
                url: "https://github.com/mohitmishra786/mdmend/releases/download/v0.2.1/mdmend_0.2.1_linux_amd64.tar.gz"
                    .to_string(),
                digest,
            },
            bytes: Bytes::from(bytes.to_vec()),
        }
    }

    #[test]
    fn verified_archive_installs_to_bindir() {
        let root = TempDir::new().unwrap();
        let locations = locations(&root);
        let archive = tool_archive("mdmend", b"#!/bin/sh\necho ok\n");
        let fetched = variant_for(&archive, Digest::of_bytes(&archive));

        let installed = install_fetched(fetched, "mdmend", &locations).unwrap();

        assert_eq!(installed.path, locations.binary_path("mdmend"));
        assert!(installed.path.is_file());
    }

    #[test]
    fn reinstall_produces_identical_executable() {
        let root = TempDir::new().unwrap();
        let locations = locations(&root);
        let archive = tool_archive("mdmend", b"#!/bin/sh\necho ok\n");

        let first = install_fetched(
            variant_for(&archive, Digest::of_bytes(&archive)),
            "mdmend",
            &locations,
        )
        .unwrap();
        let first_bytes = std::fs::read(&first.path).unwrap();

        let second = install_fetched(
            variant_for(&archive, Digest::of_bytes(&archive)),
            "mdmend",
            &locations,
        )
        .unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(std::fs::read(&second.path).unwrap(), first_bytes);
    }

    #[test]
    fn digest_mismatch_writes_nothing() {
        let root = TempDir::new().unwrap();
        let locations = locations(&root);
        let archive = tool_archive("mdmend", b"payload");
        let fetched = variant_for(&archive, Digest::of_bytes(b"some other payload"));

        let err = install_fetched(fetched, "mdmend", &locations).unwrap_err();

        assert!(matches!(err, Error::DigestMismatch { .. }));
        assert!(!locations.bindir.exists());
    }

    #[test]
    fn missing_binary_in_archive_writes_nothing() {
        let root = TempDir::new().unwrap();
        let locations = locations(&root);
        let archive = tool_archive("README.md", b"not the tool");
        let fetched = variant_for(&archive, Digest::of_bytes(&archive));

        let err = install_fetched(fetched, "mdmend", &locations).unwrap_err();

        assert!(matches!(err, Error::BinaryNotFound { .. }));
        assert!(!locations.bindir.exists());
    }

    #[test]
    fn placeholder_manifest_aborts_before_any_fetch() {
        let root = TempDir::new().unwrap();
        let locations = locations(&root);
        let manifest = ToolManifest::from_toml_str(
            r#"
name = "mdmend"
description = "Markdown linter and fixer"
homepage = "https://github.com/mohitmishra786/mdmend"
license = "MIT"
repository = "https://github.com/mohitmishra786/mdmend"
version = "0.2.1"

[digests]
"darwin-amd64" = "REPLACE_WITH_ACTUAL_SHA256"
"darwin-arm64" = "REPLACE_WITH_ACTUAL_SHA256"
"linux-amd64" = "REPLACE_WITH_ACTUAL_SHA256"
"linux-arm64" = "REPLACE_WITH_ACTUAL_SHA256"
"#,
        )
        .unwrap();
        let client = ReleaseClient::new().unwrap();
        let platform = Platform::from_str("linux-amd64").unwrap();

        let err = tokio_test::block_on(run_install(
            &client, &manifest, platform, &locations, true,
        ))
        .unwrap_err();

        assert!(matches!(err, Error::PlaceholderDigest { .. }));
        assert!(!locations.bindir.exists());
    }
}
