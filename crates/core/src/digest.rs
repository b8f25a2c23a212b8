//! SHA256 digests in their lowercase hex form.

use sha2::{Digest as _, Sha256};

/// A validated sha256 digest, stored as 64 lowercase hex characters.
///
/// Release manifests and `checksums.txt` both carry digests in this form.
/// Construction goes through [`Digest::try_from_hex`] or
/// [`Digest::of_bytes`], so a held `Digest` is always well-formed; whether a
/// raw manifest value is a placeholder is decided before construction via
/// [`Digest::is_placeholder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Parse a digest from its hex representation.
    ///
    /// Accepts uppercase input and normalizes it; rejects anything that is
    /// not exactly 64 hex characters.
    #[must_use]
    pub fn try_from_hex(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        if normalized.len() == 64 && normalized.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(normalized))
        } else {
            None
        }
    }

    /// Compute the digest of a byte slice.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = hasher.finalize();
        Self(format!("{hash:x}"))
    }

    /// Whether a raw manifest value is an unfilled placeholder rather than a
    /// digest attempt.
    ///
    /// Covers the empty string, the literal `REPLACE_WITH_ACTUAL_SHA256`
    /// convention (any value mentioning "replace"), and the all-zero digest
    /// sometimes used as filler.
    #[must_use]
    pub fn is_placeholder(s: &str) -> bool {
        let trimmed = s.trim();
        trimmed.is_empty()
            || trimmed.to_lowercase().contains("replace")
            || trimmed.chars().all(|c| c == '0')
    }

    /// The hex form of this digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
