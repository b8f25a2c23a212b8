//! The `decant info` command.

use std::path::Path;

use decant_core::{Digest, Platform, Result};

use super::load_manifest;
use crate::cli::EXIT_OK;

pub fn run(manifest_path: Option<&Path>) -> Result<i32> {
    let (manifest, path) = load_manifest(manifest_path)?;

    println!("{} {}", manifest.name, manifest.version);
    println!("  {}", manifest.description);
    println!("  homepage:   {}", manifest.homepage);
    println!("  license:    {}", manifest.license);
    println!("  repository: {}", manifest.repository);
    println!("  manifest:   {}", path.display());
    println!("digests:");
    for &platform in Platform::all() {
        let status = digest_status(manifest.digest_for(&platform.to_string()));
        println!("  {platform:<14} {status}");
    }
    Ok(EXIT_OK)
}

/// One-word digest status for a platform cell, with a short prefix for
/// well-formed values.
fn digest_status(value: Option<&str>) -> String {
    match value {
        None => "missing".to_string(),
        Some(raw) if Digest::is_placeholder(raw) => "placeholder".to_string(),
        Some(raw) => Digest::try_from_hex(raw).map_or_else(
            || "invalid".to_string(),
            |digest| format!("set ({})", &digest.as_str()[..12]),
        ),
    }
}
