//! Command-line surface for decant.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogLevel;

/// Exit code for success.
pub const EXIT_OK: i32 = 0;
/// Exit code for any fatal error or a failed check suite.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for SIGINT (128 + signal number 2).
pub const EXIT_SIGINT: i32 = 130;

/// Platform-aware installer for pinned release binaries.
#[derive(Parser, Debug)]
#[command(name = "decant")]
#[command(about = "Install, verify, and smoke-test pinned release binaries")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Path to the tool manifest. Defaults to discovering `decant.toml`
    /// upward from the current directory.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "DECANT_MANIFEST",
        help = "Path to decant.toml"
    )]
    pub manifest: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full install pipeline: resolve, fetch, verify, install,
    /// provision completions.
    #[command(about = "Download, verify, and install the pinned release")]
    Install {
        /// Install this version instead of the manifest's pinned one.
        /// Digest verification still uses the pinned digest table, so an
        /// unpinned version fails closed.
        #[arg(long, value_name = "VERSION")]
        version: Option<String>,

        /// Directory to place the binary in.
        #[arg(long, value_name = "DIR")]
        bindir: Option<PathBuf>,

        /// Root directory for shell completion scripts.
        #[arg(long, value_name = "DIR")]
        completions_dir: Option<PathBuf>,

        /// Skip completion provisioning entirely.
        #[arg(long)]
        skip_completions: bool,

        /// Install for this platform instead of the detected one
        /// (`os-arch`, e.g. `linux-amd64`).
        #[arg(long, value_name = "OS-ARCH")]
        platform: Option<String>,
    },

    /// Run the acceptance checks against the installed binary.
    #[command(about = "Smoke-test the installed binary")]
    Check {
        /// Directory the binary was installed to.
        #[arg(long, value_name = "DIR")]
        bindir: Option<PathBuf>,
    },

    /// Show manifest metadata and per-platform digest status.
    #[command(about = "Show manifest metadata and digest status")]
    Info,

    /// Query the release host for the latest published version.
    #[command(about = "Show the latest published release version")]
    Latest,

    /// Rewrite the manifest's digest table from the release's
    /// `checksums.txt`.
    #[command(name = "sync-digests")]
    #[command(about = "Fill the digest table from the published checksums")]
    SyncDigests {
        /// Sync digests for this version instead of the pinned one, and
        /// pin it.
        #[arg(long, value_name = "VERSION")]
        version: Option<String>,

        /// Print the would-be manifest instead of rewriting the file.
        #[arg(long)]
        dry_run: bool,
    },
}
