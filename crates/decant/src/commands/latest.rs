//! The `decant latest` command.

use std::path::Path;

use decant_core::Result;
use decant_release::ReleaseClient;

use super::load_manifest;
use crate::cli::EXIT_OK;

pub async fn run(manifest_path: Option<&Path>) -> Result<i32> {
    let (manifest, _) = load_manifest(manifest_path)?;
    let client = ReleaseClient::new()?;
    let latest = client.latest_version(&manifest.repository).await?;

    println!("latest: {latest}");
    println!("pinned: {}", manifest.version);
    if latest != manifest.version {
        println!("Run 'decant sync-digests --version {latest}' to pin the latest release.");
    }
    Ok(EXIT_OK)
}
