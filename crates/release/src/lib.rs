//! Release resolution and fetching for decant.
//!
//! This crate owns the host side of an install: turning the tool manifest
//! into a validated [`VariantMatrix`], downloading the pinned archive for a
//! platform, and keeping the manifest's digest table in sync with a
//! published release. Nothing here writes to the filesystem; the bytes it
//! produces stay in memory until digest verification has passed.

pub mod checksums;
pub mod client;
pub mod resolve;
pub mod sync;

pub use checksums::ChecksumsManifest;
pub use client::ReleaseClient;
pub use resolve::{VariantMatrix, archive_filename, checksums_url, download_url};
pub use sync::{apply_checksums, sync_digests};
