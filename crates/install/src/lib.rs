//! Installation stages for decant: extraction, placement, completions.
//!
//! The crate consumes what `decant-release` produces. Its entry point is
//! [`run_install`], the sequential pipeline; the individual stages are
//! public for callers that already hold a fetched archive.

pub mod completions;
pub mod extract;
pub mod pipeline;
pub mod place;

pub use completions::{CompletionOutcome, provision_completions};
pub use extract::{ExtractedBinary, extract_binary};
pub use pipeline::{InstallReport, install_fetched, run_install};
pub use place::{InstalledExecutable, place_binary};
