//! The `checksums.txt` manifest published alongside release archives.
//!
//! Each line pairs a SHA-256 digest with a published filename in the
//! sha256sum-compatible form `{digest}  {filename}`. Releases publish one
//! entry per platform archive; the sync command reads this file to fill the
//! tool manifest's digest table.

use std::collections::BTreeMap;

use decant_core::{Digest, Error, Result};

/// Parsed checksum manifest: one digest per published filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumsManifest {
    entries: BTreeMap<String, Digest>,
}

impl ChecksumsManifest {
    /// Parse the sha256sum-compatible checksum format.
    ///
    /// Blank lines are skipped. A leading `*` on the filename (sha256sum
    /// binary mode) is tolerated.
    ///
    /// # Errors
    ///
    /// Returns a manifest error naming the offending line when an entry is
    /// not a well-formed digest/filename pair.
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (digest, filename) = line.split_once("  ").ok_or_else(|| {
                Error::manifest(
                    format!(
                        "checksums.txt line {}: malformed entry '{line}' \
                         (expected '<sha256>  <filename>')",
                        index + 1
                    ),
                    None,
                )
            })?;
            let digest = Digest::try_from_hex(digest).ok_or_else(|| {
                Error::manifest(
                    format!(
                        "checksums.txt line {}: '{digest}' is not a SHA-256 digest",
                        index + 1
                    ),
                    None,
                )
            })?;
            let filename = filename.trim_start_matches('*').trim();
            if filename.is_empty() {
                return Err(Error::manifest(
                    format!("checksums.txt line {}: missing filename", index + 1),
                    None,
                ));
            }
            entries.insert(filename.to_string(), digest);
        }
        Ok(Self { entries })
    }

    /// The digest recorded for `filename`, if present.
    #[must_use]
    pub fn digest_for(&self, filename: &str) -> Option<&Digest> {
        self.entries.get(filename)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Published filenames in sorted order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855  mdmend_0.2.1_darwin_amd64.tar.gz
b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9  mdmend_0.2.1_darwin_arm64.tar.gz
2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824  mdmend_0.2.1_linux_amd64.tar.gz
486ea46224d1bb4fb680f34f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a7  mdmend_0.2.1_linux_arm64.tar.gz
";

    #[test]
    fn parses_release_checksums() {
        let manifest = ChecksumsManifest::parse(SAMPLE).unwrap();
        assert_eq!(manifest.len(), 4);
        assert_eq!(
            manifest
                .digest_for("mdmend_0.2.1_linux_amd64.tar.gz")
                .unwrap()
                .as_str(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn unknown_filename_has_no_digest() {
        let manifest = ChecksumsManifest::parse(SAMPLE).unwrap();
        assert!(manifest.digest_for("mdmend_0.2.1_windows_amd64.zip").is_none());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let content = format!("\n{SAMPLE}\n\n");
        let manifest = ChecksumsManifest::parse(&content).unwrap();
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn binary_mode_marker_is_tolerated() {
        let content =
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855  *mdmend_0.2.1_linux_amd64.tar.gz\n";
        let manifest = ChecksumsManifest::parse(content).unwrap();
        assert!(manifest.digest_for("mdmend_0.2.1_linux_amd64.tar.gz").is_some());
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let content = "not a checksum line\n";
        let err = ChecksumsManifest::parse(content).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn short_digest_is_rejected() {
        let content = "deadbeef  mdmend_0.2.1_linux_amd64.tar.gz\n";
        let err = ChecksumsManifest::parse(content).unwrap_err();
        assert!(err.to_string().contains("not a SHA-256 digest"));
    }

    #[test]
    fn empty_input_parses_to_empty_manifest() {
        let manifest = ChecksumsManifest::parse("").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn filenames_are_sorted() {
        let manifest = ChecksumsManifest::parse(SAMPLE).unwrap();
        let names: Vec<&str> = manifest.filenames().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
