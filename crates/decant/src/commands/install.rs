//! The `decant install` command.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use decant_core::{InstallLocations, Platform, Result};
use decant_install::{CompletionOutcome, run_install};
use decant_release::ReleaseClient;

use super::load_manifest;
use crate::cli::EXIT_OK;

pub async fn run(
    manifest_path: Option<&Path>,
    version: Option<String>,
    bindir: Option<PathBuf>,
    completions_dir: Option<PathBuf>,
    skip_completions: bool,
    platform: Option<&str>,
) -> Result<i32> {
    let (mut manifest, _) = load_manifest(manifest_path)?;
    if let Some(version) = version {
        manifest.version = version;
    }
    let platform = match platform {
        Some(value) => Platform::from_str(value)?,
        None => Platform::current()?,
    };
    let locations = InstallLocations::resolve(bindir, completions_dir)?;
    let client = ReleaseClient::new()?;

    println!(
        "Installing {} {} for {platform}",
        manifest.name, manifest.version
    );

    let report = run_install(&client, &manifest, platform, &locations, !skip_completions).await?;

    println!("Installed {}", report.executable.path.display());
    for outcome in &report.completions {
        match outcome {
            CompletionOutcome::Installed { shell, path } => {
                println!("  {shell} completions: {}", path.display());
            }
            CompletionOutcome::Skipped { shell, reason } => {
                println!("  warning: {shell} completions skipped: {reason}");
            }
        }
    }
    println!("Run 'decant check' to verify the install.");
    Ok(EXIT_OK)
}
