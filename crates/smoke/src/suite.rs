//! The post-install acceptance checks.
//!
//! Three black-box checks against the installed binary, asserting only
//! exit codes and output substrings so the tool's exact phrasing is free
//! to evolve. The checks are independent: all of them run even when an
//! earlier one fails, and the suite passes only if every check passes.

use std::path::Path;
use std::time::Duration;

use decant_core::{CapturedOutput, Result, run_captured};
use regex::Regex;
use tracing::{debug, info};

/// Markdown fixture fed to the lint and fix checks. Deliberately violates
/// the hard-tab rule.
pub const LINT_FIXTURE: &str = "# Test\n\nHello\tWorld\n";

/// Rule identifier the lint and fix checks expect in the tool's output.
pub const HARD_TAB_RULE: &str = "MD010";

/// Budget for each check's subprocess.
const CHECK_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of one acceptance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Stable check name.
    pub name: &'static str,
    /// Pass/fail outcome.
    pub outcome: CheckOutcome,
}

/// Pass/fail outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The check's assertions held.
    Passed,
    /// At least one assertion failed.
    Failed {
        /// What was expected and what was observed.
        detail: String,
    },
}

impl CheckReport {
    fn passed(name: &'static str) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Passed,
        }
    }

    fn failed(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Failed {
                detail: detail.into(),
            },
        }
    }

    /// Whether this check passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Passed)
    }
}

/// Combined outcome of the acceptance suite.
#[derive(Debug, Clone)]
pub struct AcceptanceReport {
    /// All check results, in execution order.
    pub checks: Vec<CheckReport>,
}

impl AcceptanceReport {
    /// Whether every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckReport::is_passed)
    }

    /// The checks that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CheckReport> {
        self.checks.iter().filter(|check| !check.is_passed())
    }
}

/// Run the acceptance suite against an installed binary.
///
/// `tool` is the name the version output is expected to lead with.
///
/// # Errors
///
/// Returns an I/O error when the lint fixture cannot be staged. Check
/// failures do not error; they are recorded in the report.
pub async fn run_acceptance(binary: &Path, tool: &str) -> Result<AcceptanceReport> {
    info!(binary = %binary.display(), %tool, "running acceptance checks");

    let workdir = tempfile::tempdir()?;
    let fixture = workdir.path().join("fixture.md");
    std::fs::write(&fixture, LINT_FIXTURE)?;

    let checks = vec![
        version_check(binary, tool).await,
        lint_check(binary, &fixture).await,
        fix_dry_run_check(binary, &fixture).await,
    ];

    let report = AcceptanceReport { checks };
    info!(
        passed = report.passed(),
        failures = report.failures().count(),
        "acceptance checks finished"
    );
    Ok(report)
}

/// `--version` exits zero and prints the tool name followed by whitespace.
async fn version_check(binary: &Path, tool: &str) -> CheckReport {
    const NAME: &str = "version";
    debug!(check = NAME, "running");

    let output = match run_captured(binary, &["--version"], CHECK_TIMEOUT).await {
        Ok(output) => output,
        Err(e) => return CheckReport::failed(NAME, e.to_string()),
    };
    if !output.success() {
        return CheckReport::failed(
            NAME,
            format!("expected exit 0, got {}", describe_status(&output)),
        );
    }

    let pattern = match Regex::new(&format!(r"{}\s+", regex::escape(tool))) {
        Ok(pattern) => pattern,
        Err(e) => return CheckReport::failed(NAME, format!("invalid version pattern: {e}")),
    };
    if !pattern.is_match(&output.stdout) {
        return CheckReport::failed(
            NAME,
            format!(
                "version output does not contain '{tool}' followed by a version: {:?}",
                output.stdout.trim()
            ),
        );
    }
    CheckReport::passed(NAME)
}

/// `lint` on the fixture exits non-zero and names the hard-tab rule.
async fn lint_check(binary: &Path, fixture: &Path) -> CheckReport {
    const NAME: &str = "lint";
    debug!(check = NAME, "running");

    let fixture_arg = fixture.to_string_lossy();
    let output = match run_captured(binary, &["lint", &fixture_arg], CHECK_TIMEOUT).await {
        Ok(output) => output,
        Err(e) => return CheckReport::failed(NAME, e.to_string()),
    };
    if output.success() {
        return CheckReport::failed(
            NAME,
            "expected a non-zero exit for a fixture with hard tabs, got exit 0",
        );
    }
    if !output.combined().contains(HARD_TAB_RULE) {
        return CheckReport::failed(
            NAME,
            format!(
                "lint output does not mention {HARD_TAB_RULE}: {:?}",
                output.combined().trim()
            ),
        );
    }
    CheckReport::passed(NAME)
}

/// `fix --dry-run` exits zero, names the rule, and leaves the file alone.
async fn fix_dry_run_check(binary: &Path, fixture: &Path) -> CheckReport {
    const NAME: &str = "fix-dry-run";
    debug!(check = NAME, "running");

    let fixture_arg = fixture.to_string_lossy();
    let output = match run_captured(
        binary,
        &["fix", "--dry-run", &fixture_arg],
        CHECK_TIMEOUT,
    )
    .await
    {
        Ok(output) => output,
        Err(e) => return CheckReport::failed(NAME, e.to_string()),
    };
    if !output.success() {
        return CheckReport::failed(
            NAME,
            format!("expected exit 0, got {}", describe_status(&output)),
        );
    }
    if !output.combined().contains(HARD_TAB_RULE) {
        return CheckReport::failed(
            NAME,
            format!(
                "dry-run output does not mention {HARD_TAB_RULE}: {:?}",
                output.combined().trim()
            ),
        );
    }
    match std::fs::read_to_string(fixture) {
        Ok(content) if content == LINT_FIXTURE => CheckReport::passed(NAME),
        Ok(_) => CheckReport::failed(NAME, "dry-run modified the fixture file"),
        Err(e) => CheckReport::failed(NAME, format!("could not re-read fixture: {e}")),
    }
}

fn describe_status(output: &CapturedOutput) -> String {
    output.status.map_or_else(
        || "termination by signal".to_string(),
        |code| format!("exit {code}"),
    )
}

#[cfg(unix)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A well-behaved stand-in for the installed linter.
    const GOOD_TOOL: &str = r#"#!/bin/sh
case "$1" in
  --version)
    echo "mdmend 0.2.1"
    exit 0
    ;;
  lint)
    echo "$2:3:6 MD010 hard tab character"
    exit 1
    ;;
  fix)
    if [ "$2" = "--dry-run" ]; then
      echo "would fix MD010 in $3"
      exit 0
    fi
    echo "fixed" > "$2"
    exit 0
    ;;
esac
exit 64
"#;

    fn fake_tool(root: &TempDir, script: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = root.path().join("mdmend");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn conforming_tool_passes_every_check() {
        let root = TempDir::new().unwrap();
        let binary = fake_tool(&root, GOOD_TOOL);

        let report = run_acceptance(&binary, "mdmend").await.unwrap();

        assert!(report.passed(), "failures: {:?}", report.checks);
        assert_eq!(report.checks.len(), 3);
    }

    #[tokio::test]
    async fn wrong_tool_name_fails_version_check() {
        let root = TempDir::new().unwrap();
        let binary = fake_tool(
            &root,
            "#!/bin/sh\nif [ \"$1\" = --version ]; then echo 'other 1.0'; exit 0; fi\necho MD010; exit 1\n",
        );

        let report = run_acceptance(&binary, "mdmend").await.unwrap();

        assert!(!report.passed());
        let version = report.checks.iter().find(|c| c.name == "version").unwrap();
        assert!(!version.is_passed());
    }

    #[tokio::test]
    async fn clean_lint_exit_fails_the_lint_check() {
        let root = TempDir::new().unwrap();
        // Lints nothing: exit 0 even on the tab fixture.
        let binary = fake_tool(
            &root,
            "#!/bin/sh\nif [ \"$1\" = --version ]; then echo 'mdmend 0.2.1'; exit 0; fi\nif [ \"$1\" = lint ]; then exit 0; fi\necho 'would fix MD010'; exit 0\n",
        );

        let report = run_acceptance(&binary, "mdmend").await.unwrap();

        let lint = report.checks.iter().find(|c| c.name == "lint").unwrap();
        let CheckOutcome::Failed { detail } = &lint.outcome else {
            panic!("lint check unexpectedly passed");
        };
        assert!(detail.contains("non-zero"));
    }

    #[tokio::test]
    async fn mutating_dry_run_fails_the_fix_check() {
        let root = TempDir::new().unwrap();
        let binary = fake_tool(
            &root,
            r#"#!/bin/sh
case "$1" in
  --version) echo "mdmend 0.2.1"; exit 0 ;;
  lint) echo "MD010"; exit 1 ;;
  fix) echo "would fix MD010" ; echo mutated > "$3"; exit 0 ;;
esac
exit 64
"#,
        );

        let report = run_acceptance(&binary, "mdmend").await.unwrap();

        let fix = report.checks.iter().find(|c| c.name == "fix-dry-run").unwrap();
        let CheckOutcome::Failed { detail } = &fix.outcome else {
            panic!("fix-dry-run check unexpectedly passed");
        };
        assert!(detail.contains("modified"));
    }

    #[tokio::test]
    async fn missing_binary_fails_every_check() {
        let root = TempDir::new().unwrap();
        let binary = root.path().join("not-installed");

        let report = run_acceptance(&binary, "mdmend").await.unwrap();

        assert!(!report.passed());
        assert_eq!(report.failures().count(), 3);
    }

    #[test]
    fn fixture_contains_a_hard_tab() {
        assert!(LINT_FIXTURE.contains('\t'));
        assert!(LINT_FIXTURE.starts_with("# Test\n"));
    }
}
