//! Executable extraction from verified release archives.
//!
//! Release archives are gzip-compressed tarballs carrying the tool
//! executable at the archive root under the tool's own name. Extraction is
//! performed entirely in memory against a [`VerifiedArchive`], so unverified
//! bytes can never reach this stage. A damaged stream and a well-formed
//! archive that simply lacks the expected entry are reported as different
//! errors.

use std::io::Read;
use std::path::{Component, Path};

use decant_core::{Error, Result, VerifiedArchive};
use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;

/// Executable bytes pulled out of a verified archive, not yet on disk.
#[derive(Debug, Clone)]
pub struct ExtractedBinary {
    /// Executable name, matching the archive entry it came from.
    pub name: String,
    /// Raw executable contents.
    pub bytes: Vec<u8>,
}

/// Pull the executable entry named `binary` out of a verified archive.
///
/// Entries are matched at the archive root; a leading `./` is tolerated.
/// Non-file entries are skipped.
///
/// # Errors
///
/// Returns [`Error::CorruptArchive`] when the stream cannot be decoded as a
/// gzip tarball, and [`Error::BinaryNotFound`] when the archive decodes
/// cleanly but has no entry for `binary`.
pub fn extract_binary(archive: &VerifiedArchive, binary: &str) -> Result<ExtractedBinary> {
    let archive_name = archive.variant().archive_name();
    let decoder = GzDecoder::new(archive.bytes());
    let mut tar = Archive::new(decoder);

    let entries = tar
        .entries()
        .map_err(|e| Error::corrupt_archive(&archive_name, e))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| Error::corrupt_archive(&archive_name, e))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry
            .path()
            .map_err(|e| Error::corrupt_archive(&archive_name, e))?;
        if !entry_matches(&path, binary) {
            continue;
        }

        let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| Error::corrupt_archive(&archive_name, e))?;
        debug!(%binary, size = bytes.len(), "extracted executable from archive");
        return Ok(ExtractedBinary {
            name: binary.to_string(),
            bytes,
        });
    }

    Err(Error::binary_not_found(binary, archive_name))
}

/// Match a root-level entry named `binary`, ignoring a leading `./`.
fn entry_matches(path: &Path, binary: &str) -> bool {
    let mut components = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir));
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name.to_str() == Some(binary),
        _ => false,
    }
}
