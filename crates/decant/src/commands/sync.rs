//! The `decant sync-digests` command.

use std::path::Path;

use decant_core::Result;
use decant_release::{ReleaseClient, sync_digests};

use super::load_manifest;
use crate::cli::EXIT_OK;

pub async fn run(
    manifest_path: Option<&Path>,
    version: Option<String>,
    dry_run: bool,
) -> Result<i32> {
    let (mut manifest, path) = load_manifest(manifest_path)?;
    if let Some(version) = version {
        manifest.version = version;
    }
    let client = ReleaseClient::new()?;

    let updated = sync_digests(&client, &manifest).await?;

    if dry_run {
        print!("{}", updated.to_toml_string()?);
    } else {
        updated.write(&path)?;
        println!(
            "Updated {} with digests for version {} ({} platforms).",
            path.display(),
            updated.version,
            updated.digests.len()
        );
    }
    Ok(EXIT_OK)
}
