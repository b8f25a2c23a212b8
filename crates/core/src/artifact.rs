//! Release artifact lifecycle: variant descriptor, fetched bytes, verified
//! bytes.
//!
//! The install order invariant lives in the types here: the installer only
//! accepts a [`VerifiedArchive`], and the sole way to obtain one is
//! [`FetchedArchive::verify`]. Skipping verification is not a runtime check
//! that can be bypassed; it simply does not compile.

use crate::{Digest, Error, Platform, Result};
use bytes::Bytes;

/// A concrete release artifact for one (os, arch) cell of the matrix.
///
/// Built by the resolver from the tool manifest; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVariant {
    /// Platform this archive was built for.
    pub platform: Platform,
    /// Release version, treated as an opaque string.
    pub version: String,
    /// Full download URL of the tar.gz archive.
    pub url: String,
    /// Digest the archive bytes must hash to.
    pub digest: Digest,
}

impl ReleaseVariant {
    /// The archive filename, as it appears in `checksums.txt`.
    #[must_use]
    pub fn archive_name(&self) -> String {
        self.url
            .rsplit('/')
            .next()
            .unwrap_or(self.url.as_str())
            .to_string()
    }
}

/// Raw archive bytes straight off the wire, not yet trusted.
///
/// Held in memory only; fetched bytes are never persisted before
/// verification.
#[derive(Debug, Clone)]
pub struct FetchedArchive {
    /// The variant these bytes were fetched for.
    pub variant: ReleaseVariant,
    /// The archive content.
    pub bytes: Bytes,
}

impl FetchedArchive {
    /// Compare the sha256 of the fetched bytes against the variant's pinned
    /// digest.
    ///
    /// Consumes the fetched state; on success the bytes move into a
    /// [`VerifiedArchive`], the only input the installer accepts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DigestMismatch`] carrying both the pinned and the
    /// computed digest. This error must never be downgraded or retried with
    /// verification skipped.
    pub fn verify(self) -> Result<VerifiedArchive> {
        let actual = Digest::of_bytes(&self.bytes);
        if actual != self.variant.digest {
            return Err(Error::digest_mismatch(
                &self.variant.url,
                self.variant.digest.as_str(),
                actual.as_str(),
            ));
        }
        Ok(VerifiedArchive {
            variant: self.variant,
            bytes: self.bytes,
        })
    }
}

/// An archive whose bytes matched the pinned digest.
///
/// Fields are private so [`FetchedArchive::verify`] stays the only
/// constructor.
#[derive(Debug, Clone)]
pub struct VerifiedArchive {
    variant: ReleaseVariant,
    bytes: Bytes,
}

impl VerifiedArchive {
    /// The variant this archive was verified against.
    #[must_use]
    pub fn variant(&self) -> &ReleaseVariant {
        &self.variant
    }

    /// The verified archive content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arch, Os};
    use proptest::prelude::*;

    fn variant_for(bytes: &[u8]) -> ReleaseVariant {
        ReleaseVariant {
            platform: Platform::new(Os::Linux, Arch::Amd64),
            version: "1.0.0".to_string(),
            url: "https://example.com/releases/download/v1.0.0/tool_1.0.0_linux_amd64.tar.gz"
                .to_string(),
            digest: Digest::of_bytes(bytes),
        }
    }

    #[test]
    fn test_verify_accepts_matching_bytes() {
        let content = b"archive content".to_vec();
        let fetched = FetchedArchive {
            variant: variant_for(&content),
            bytes: Bytes::from(content.clone()),
        };

        let verified = fetched.verify().unwrap();
        assert_eq!(verified.bytes(), content.as_slice());
        assert_eq!(verified.variant().version, "1.0.0");
    }

    #[test]
    fn test_verify_rejects_mismatched_bytes() {
        let fetched = FetchedArchive {
            variant: variant_for(b"what the release built"),
            bytes: Bytes::from_static(b"what the host served"),
        };

        let err = fetched.verify().unwrap_err();
        assert!(matches!(err, Error::DigestMismatch { .. }));
    }

    #[test]
    fn test_verify_error_carries_expected_and_actual() {
        let expected = Digest::of_bytes(b"original");
        let fetched = FetchedArchive {
            variant: variant_for(b"original"),
            bytes: Bytes::from_static(b"tampered"),
        };
        let actual = Digest::of_bytes(b"tampered");

        let err = fetched.verify().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(expected.as_str()));
        assert!(msg.contains(actual.as_str()));
    }

    #[test]
    fn test_verify_is_deterministic() {
        let content = Bytes::from_static(b"stable content");
        for _ in 0..3 {
            let fetched = FetchedArchive {
                variant: variant_for(&content),
                bytes: content.clone(),
            };
            assert!(fetched.verify().is_ok());
        }
    }

    #[test]
    fn test_archive_name_from_url() {
        let variant = variant_for(b"x");
        assert_eq!(variant.archive_name(), "tool_1.0.0_linux_amd64.tar.gz");
    }

    proptest! {
        /// Flipping any single bit of the content makes verification fail.
        #[test]
        fn prop_any_byte_flip_fails_verification(
            content in proptest::collection::vec(any::<u8>(), 1..512),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let variant = variant_for(&content);
            let mut corrupted = content.clone();
            let at = index.index(corrupted.len());
            corrupted[at] ^= 1 << bit;

            let fetched = FetchedArchive {
                variant,
                bytes: Bytes::from(corrupted),
            };
            prop_assert!(fetched.verify().is_err());
        }

        /// Unmodified content always verifies.
        #[test]
        fn prop_identical_bytes_always_verify(
            content in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let fetched = FetchedArchive {
                variant: variant_for(&content),
                bytes: Bytes::from(content),
            };
            prop_assert!(fetched.verify().is_ok());
        }
    }
}
