//! Shell completion provisioning from the installed binary.
//!
//! Completion scripts are generated by the just-installed executable
//! itself, so this stage runs it as a bounded subprocess and treats every
//! failure as non-fatal: a tool without a `completion` subcommand still
//! installs cleanly. Each shell is attempted independently and the outcome
//! of every attempt is reported back to the caller.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use decant_core::{Error, InstallLocations, Result, Shell, run_captured};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::place::InstalledExecutable;

/// Budget for one completion-generation subprocess.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of provisioning one shell's completion script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Script written to the shell's completion directory.
    Installed {
        /// Shell the script targets.
        shell: Shell,
        /// Final path of the script.
        path: PathBuf,
    },
    /// Provisioning failed for this shell; the install itself stands.
    Skipped {
        /// Shell the attempt targeted.
        shell: Shell,
        /// Human-readable failure reason.
        reason: String,
    },
}

impl CompletionOutcome {
    /// Shell this outcome belongs to.
    #[must_use]
    pub const fn shell(&self) -> Shell {
        match self {
            Self::Installed { shell, .. } | Self::Skipped { shell, .. } => *shell,
        }
    }
}

/// Generate and write completion scripts for every supported shell.
///
/// Runs `{binary} completion {shell}` once per shell with a bounded
/// timeout and writes captured stdout to the shell's completion directory.
/// The shells are independent read-only derivations of the same binary, so
/// they run concurrently; outcomes come back in [`Shell::all`] order.
/// Failures are logged as warnings and recorded in the returned outcomes;
/// they never propagate.
pub async fn provision_completions(
    installed: &InstalledExecutable,
    tool: &str,
    locations: &InstallLocations,
) -> Vec<CompletionOutcome> {
    let attempts = Shell::all().iter().map(|&shell| async move {
        match provision_one(installed, tool, shell, locations).await {
            Ok(path) => {
                debug!(%shell, path = %path.display(), "completion script installed");
                CompletionOutcome::Installed { shell, path }
            }
            Err(e) => {
                warn!(%shell, error = %e, "completion provisioning failed, continuing");
                CompletionOutcome::Skipped {
                    shell,
                    reason: e.to_string(),
                }
            }
        }
    });
    join_all(attempts).await
}

async fn provision_one(
    installed: &InstalledExecutable,
    tool: &str,
    shell: Shell,
    locations: &InstallLocations,
) -> Result<PathBuf> {
    let output = run_captured(
        &installed.path,
        &["completion", shell.name()],
        COMPLETION_TIMEOUT,
    )
    .await
    .map_err(|e| Error::completion_provision(shell.name(), e.to_string()))?;

    if !output.success() {
        return Err(Error::completion_provision(
            shell.name(),
            format!(
                "completion subcommand exited with {}: {}",
                output
                    .status
                    .map_or_else(|| "signal".to_string(), |code| code.to_string()),
                output.stderr.trim()
            ),
        ));
    }
    if output.stdout.trim().is_empty() {
        return Err(Error::completion_provision(
            shell.name(),
            "completion subcommand produced no output",
        ));
    }

    let path = locations.completion_path(shell, tool);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::completion_provision(
                shell.name(),
                format!("failed to create {}: {e}", parent.display()),
            )
        })?;
    }

    // Stage-and-rename so another process sourcing the script never sees
    // a partial write.
    let stage = path.with_extension("tmp");
    fs::write(&stage, output.stdout.as_bytes()).map_err(|e| {
        Error::completion_provision(
            shell.name(),
            format!("failed to write {}: {e}", stage.display()),
        )
    })?;
    fs::rename(&stage, &path).map_err(|e| {
        let _ = fs::remove_file(&stage);
        Error::completion_provision(
            shell.name(),
            format!("failed to move {} into place: {e}", path.display()),
        )
    })?;

    Ok(path)
}

#[cfg(unix)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_binary(root: &TempDir, script: &str) -> InstalledExecutable {
        use std::os::unix::fs::PermissionsExt;

        let path = root.path().join("mdmend");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        InstalledExecutable { path }
    }

    fn locations(root: &TempDir) -> InstallLocations {
        InstallLocations::resolve(
            Some(root.path().join("bin")),
            Some(root.path().join("completions")),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn provisions_a_script_per_shell() {
        let root = TempDir::new().unwrap();
        let script = "#!/bin/sh\nif [ \"$1\" = completion ]; then echo \"# completions for $2\"; exit 0; fi\nexit 1\n";
        let installed = fake_binary(&root, script);
        let locations = locations(&root);

        let outcomes = provision_completions(&installed, "mdmend", &locations).await;

        assert_eq!(outcomes.len(), Shell::all().len());
        for outcome in &outcomes {
            let CompletionOutcome::Installed { shell, path } = outcome else {
                panic!("expected installed outcome, got {outcome:?}");
            };
            let content = fs::read_to_string(path).unwrap();
            assert_eq!(content, format!("# completions for {}\n", shell.name()));
            assert_eq!(*path, locations.completion_path(*shell, "mdmend"));
        }
    }

    #[tokio::test]
    async fn failing_subcommand_is_skipped_not_fatal() {
        let root = TempDir::new().unwrap();
        let installed = fake_binary(&root, "#!/bin/sh\necho 'no such command' >&2\nexit 2\n");
        let locations = locations(&root);

        let outcomes = provision_completions(&installed, "mdmend", &locations).await;

        assert_eq!(outcomes.len(), Shell::all().len());
        for outcome in &outcomes {
            let CompletionOutcome::Skipped { reason, .. } = outcome else {
                panic!("expected skipped outcome, got {outcome:?}");
            };
            assert!(reason.contains("exited with 2"));
        }
        assert!(!locations.completions_dir.exists());
    }

    #[tokio::test]
    async fn empty_output_is_skipped() {
        let root = TempDir::new().unwrap();
        let installed = fake_binary(&root, "#!/bin/sh\nexit 0\n");
        let locations = locations(&root);

        let outcomes = provision_completions(&installed, "mdmend", &locations).await;

        for outcome in &outcomes {
            assert!(matches!(outcome, CompletionOutcome::Skipped { .. }));
        }
    }

    #[tokio::test]
    async fn missing_binary_is_skipped() {
        let root = TempDir::new().unwrap();
        let installed = InstalledExecutable {
            path: root.path().join("does-not-exist"),
        };
        let locations = locations(&root);

        let outcomes = provision_completions(&installed, "mdmend", &locations).await;

        assert_eq!(outcomes.len(), Shell::all().len());
        assert!(
            outcomes
                .iter()
                .all(|o| matches!(o, CompletionOutcome::Skipped { .. }))
        );
    }
}
