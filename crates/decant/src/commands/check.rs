//! The `decant check` command.

use std::path::{Path, PathBuf};

use decant_core::{Result, default_bindir};
use decant_smoke::{CheckOutcome, run_acceptance};

use super::load_manifest;
use crate::cli::{EXIT_FAILURE, EXIT_OK};

pub async fn run(manifest_path: Option<&Path>, bindir: Option<PathBuf>) -> Result<i32> {
    let (manifest, _) = load_manifest(manifest_path)?;
    let bindir = match bindir {
        Some(dir) => dir,
        None => default_bindir()?,
    };
    let binary = bindir.join(&manifest.name);

    println!("Checking {} at {}", manifest.name, binary.display());
    let report = run_acceptance(&binary, &manifest.name).await?;

    for check in &report.checks {
        match &check.outcome {
            CheckOutcome::Passed => println!("  ok   {}", check.name),
            CheckOutcome::Failed { detail } => println!("  FAIL {}: {detail}", check.name),
        }
    }

    if report.passed() {
        println!("All {} checks passed.", report.checks.len());
        Ok(EXIT_OK)
    } else {
        println!(
            "{} of {} checks failed.",
            report.failures().count(),
            report.checks.len()
        );
        Ok(EXIT_FAILURE)
    }
}
