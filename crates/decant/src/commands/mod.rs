//! Command implementations for the decant CLI.

mod check;
mod info;
mod install;
mod latest;
mod sync;

use std::path::{Path, PathBuf};

use decant_core::{Result, ToolManifest};
use tracing::debug;

use crate::cli::{Cli, Commands};

/// Dispatch the parsed CLI to its command, returning the process exit code.
///
/// # Errors
///
/// Propagates fatal command errors; the caller renders them and maps them
/// to an exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    let manifest = cli.manifest;
    match cli.command {
        Commands::Install {
            version,
            bindir,
            completions_dir,
            skip_completions,
            platform,
        } => {
            install::run(
                manifest.as_deref(),
                version,
                bindir,
                completions_dir,
                skip_completions,
                platform.as_deref(),
            )
            .await
        }
        Commands::Check { bindir } => check::run(manifest.as_deref(), bindir).await,
        Commands::Info => info::run(manifest.as_deref()),
        Commands::Latest => latest::run(manifest.as_deref()).await,
        Commands::SyncDigests { version, dry_run } => {
            sync::run(manifest.as_deref(), version, dry_run).await
        }
    }
}

/// Load the manifest from an explicit path or by upward discovery.
fn load_manifest(path: Option<&Path>) -> Result<(ToolManifest, PathBuf)> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir()?;
            ToolManifest::discover(&cwd)?
        }
    };
    let manifest = ToolManifest::from_path(&path)?;
    debug!(path = %path.display(), tool = %manifest.name, "loaded manifest");
    Ok((manifest, path))
}
