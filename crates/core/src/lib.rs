//! Core types for the decant installer.
//!
//! decant installs a tool's prebuilt release archive: resolve the host's
//! (OS, architecture) variant, fetch the tar.gz, verify its sha256 against
//! the manifest, place the binary, and provision shell completions from the
//! installed binary itself.
//!
//! This crate holds the vocabulary the pipeline crates share:
//!
//! - [`Error`] / [`Result`] - One taxonomy for every pipeline stage
//! - [`Platform`], [`Os`], [`Arch`] - Host identification and the supported matrix
//! - [`Digest`] - Validated sha256 hex values
//! - [`ReleaseVariant`], [`FetchedArchive`], [`VerifiedArchive`] - The
//!   artifact lifecycle; verification is a type transition, not a flag
//! - [`ToolManifest`] - Static release configuration from `decant.toml`
//! - [`Shell`] - Shells completions are generated for
//! - [`InstallLocations`] - Where binaries and completions land
//! - [`run_captured`] - Deadline-bounded subprocess capture

pub mod artifact;
pub mod digest;
pub mod error;
pub mod manifest;
pub mod paths;
pub mod platform;
pub mod process;
pub mod shell;

pub use artifact::{FetchedArchive, ReleaseVariant, VerifiedArchive};
pub use digest::Digest;
pub use error::{Error, Result};
pub use manifest::{MANIFEST_FILE, ToolManifest};
pub use paths::{InstallLocations, default_bindir, default_completions_dir};
pub use platform::{Arch, Os, Platform};
pub use process::{CapturedOutput, run_captured};
pub use shell::Shell;
